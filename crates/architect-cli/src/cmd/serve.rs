use architect_server::AppState;
use std::path::Path;

use super::Secrets;

pub fn run(
    root: &Path,
    port: u16,
    open: bool,
    admin: Option<(String, String)>,
    secrets: Secrets,
) -> anyhow::Result<()> {
    let mut config = super::load_config(root)?;
    if let Some((user, password)) = admin {
        config.auth.upsert_user(&user, &password);
        tracing::info!(user, "admin user added from environment");
    }
    let state = AppState::new(root.to_path_buf(), config, secrets.into());

    super::runtime()?.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
        let url = format!("http://localhost:{}", listener.local_addr()?.port());
        println!("Architect dashboard → {url}/dashboard");

        tokio::select! {
            res = architect_server::serve_on(state, listener, open) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
