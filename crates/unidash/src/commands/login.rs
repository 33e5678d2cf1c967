//! `unidash login`: authenticate and report the session.

use serde::Serialize;
use tabled::Tabled;

use unidash_core::ControllerSession;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct SessionInfo {
    controller: String,
    site: String,
    username: String,
    session_id: String,
    established_at: String,
}

#[derive(Tabled)]
struct SessionRow {
    #[tabled(rename = "Controller")]
    controller: String,
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "User")]
    username: String,
    #[tabled(rename = "Since")]
    established_at: String,
}

pub async fn handle(session: &ControllerSession, global: &GlobalOpts) -> Result<(), CliError> {
    super::connect(session, global).await?;

    let Some(current) = session.current().await else {
        return Err(CliError::AuthFailed {
            message: "session was not established".into(),
        });
    };

    let info = [SessionInfo {
        controller: session.config().url.to_string(),
        site: session.config().site.clone(),
        username: current.username().to_owned(),
        session_id: current.id().to_string(),
        established_at: current.established_at().to_rfc3339(),
    }];

    let out = output::render_list(
        &global.output,
        &info,
        |i| SessionRow {
            controller: i.controller.clone(),
            site: i.site.clone(),
            username: i.username.clone(),
            established_at: i.established_at.clone(),
        },
        |i| i.session_id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
