// ABOUTME: Status command implementation.
// ABOUTME: Shows the app's latest deployment without publishing anything.

use scmpush::config::Config;
use scmpush::error::Result;
use scmpush::output::Output;
use scmpush::scm::{ScmApi, ScmClient};
use scmpush::site::SiteDescriptor;

pub async fn status(config: Config, output: Output) -> Result<()> {
    let credentials = config.resolve_credentials()?;
    let client = ScmClient::new(&credentials)?;

    output.progress(&format!(
        "Checking {} at {}",
        config.identity().display_name(),
        config.scm_uri
    ));
    let latest = client.latest_deployment().await?;

    output.site(&SiteDescriptor::new(&config.identity(), None, latest));
    Ok(())
}
