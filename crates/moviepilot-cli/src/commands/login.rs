use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use moviepilot_client::MediaServer;
use moviepilot_config::{ServerConfig, ENV_PASSWORD};

pub async fn run_login(server: &dyn MediaServer, config: &ServerConfig, output: &Output) -> Result<()> {
    if !config.has_password() {
        return Err(eyre!(
            "No password configured: set [server].password, {} or pass --prompt-password",
            ENV_PASSWORD
        ));
    }

    if !server.check_login().await {
        return Err(eyre!(
            "Login to {} as {} failed, see the log for the cause",
            config.base_url(),
            config.username
        ));
    }

    output.success(format!("Logged in to {} as {}", config.base_url(), config.username));
    Ok(())
}
