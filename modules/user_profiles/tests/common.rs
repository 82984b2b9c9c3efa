use anyhow::Result;
use std::time::Duration;
use testcontainers::runners::AsyncRunner;

pub struct MongoUnderTest {
    pub url: String,
    #[allow(dead_code, clippy::type_complexity)]
    _cleanup: Option<Box<dyn FnOnce() + Send + Sync>>,
}

pub async fn bring_up_mongo() -> Result<MongoUnderTest> {
    use testcontainers_modules::mongo::Mongo;

    let container = Mongo::default().start().await?;
    let port = container.get_host_port_ipv4(27017).await?;
    wait_for_tcp("127.0.0.1", port, Duration::from_secs(20)).await?;

    Ok(MongoUnderTest {
        url: format!("mongodb://127.0.0.1:{port}"),
        _cleanup: Some(Box::new(move || drop(container))),
    })
}

async fn wait_for_tcp(host: &str, port: u16, timeout: Duration) -> Result<()> {
    use tokio::{
        net::TcpStream,
        time::{sleep, Instant},
    };
    let deadline = Instant::now() + timeout;
    loop {
        if TcpStream::connect((host, port)).await.is_ok() {
            return Ok(());
        }
        if Instant::now() >= deadline {
            anyhow::bail!("Timeout waiting for {host}:{port}");
        }
        sleep(Duration::from_millis(200)).await;
    }
}
