pub mod handlers;

use std::env::{self, set_var};
use std::net::SocketAddr;
use anyhow::Context;
use handlers::build_router;
use lambda_http::{run, Error};
use lib::env_keys::{BIND_ADDRESS, DEFAULT_BIND_ADDRESS, LAMBDA_RUNTIME_API};
use lib::service::CommonService;
use tokio::net::TcpListener;
use tracing::info;


#[tokio::main]
async fn main() -> Result<(), Error> {
    set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");

    lambda_http::tracing::init_default_subscriber();

    let service = CommonService::new()?;
    let app = build_router(service);

    if env::var(LAMBDA_RUNTIME_API).is_ok() {
        return run(app).await;
    }

    let address = bind_address()?;
    let listener = TcpListener::bind(address).await?;
    info!("listening on {}", address);
    axum::serve(listener, app).await?;

    Ok(())
}

fn bind_address() -> anyhow::Result<SocketAddr> {
    let address = env::var(BIND_ADDRESS).unwrap_or(DEFAULT_BIND_ADDRESS.to_owned());
    address.parse().with_context(|| format!("Invalid {}: {}", BIND_ADDRESS, address))
}
