use std::net::Ipv4Addr;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A loopback listener that accepts and immediately drops connections,
/// which is all a connect-timing probe needs.
pub struct LoopbackListener {
    pub addr: Ipv4Addr,
    pub port: u16,
    handle: JoinHandle<()>,
}

impl LoopbackListener {
    pub async fn spawn() -> anyhow::Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let port: u16 = listener.local_addr()?.port();

        let handle = tokio::spawn(async move {
            loop {
                let _ = listener.accept().await;
            }
        });

        Ok(Self {
            addr: Ipv4Addr::LOCALHOST,
            port,
            handle,
        })
    }
}

impl Drop for LoopbackListener {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Binds and immediately releases an ephemeral port, leaving it closed so
/// connects to it are refused.
pub async fn closed_loopback_port() -> anyhow::Result<u16> {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
    let port: u16 = listener.local_addr()?.port();
    drop(listener);
    Ok(port)
}
