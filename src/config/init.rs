// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Writes a scmpush.yml template with the password read from the environment.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{AppName, ScmUri};

use super::{CONFIG_FILENAME, PASSWORD_ENV_VAR};

pub fn init_config(
    dir: &Path,
    app: Option<&str>,
    scm_uri: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let app = AppName::new(app.unwrap_or("my-app"))
        .map_err(|e| Error::InvalidConfig(format!("app: {e}")))?;

    let scm_uri = match scm_uri {
        Some(uri) => ScmUri::parse(uri).map_err(|e| Error::InvalidConfig(e.to_string()))?,
        None => ScmUri::parse(&format!("https://{app}.scm.azurewebsites.net"))
            .map_err(|e| Error::InvalidConfig(e.to_string()))?,
    };

    std::fs::write(&config_path, generate_template_yaml(&app, &scm_uri))?;

    Ok(())
}

fn generate_template_yaml(app: &AppName, scm_uri: &ScmUri) -> String {
    format!(
        r#"app: {app}
scm_uri: {scm_uri}
credentials:
  username: "${app}"
  password:
    env: {PASSWORD_ENV_VAR}
# Deployment slots have their own SCM endpoint; credentials default to the app's.
# slots:
#   staging:
#     scm_uri: https://{app}-staging.scm.azurewebsites.net
"#
    )
}
