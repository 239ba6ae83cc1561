//! Language Server Protocol surface for jlfmt.
//!
//! Built into the main binary and started with `jlfmt server`, over stdio
//! by default or TCP for debugging.

pub mod server;
pub mod types;

pub use server::JlfmtLanguageServer;
pub use types::JlfmtLspConfig;

use anyhow::Result;
use tokio::net::TcpListener;
use tower_lsp::{LspService, Server};

/// Start the language server on stdio. Logging must go to stderr; stdout
/// belongs to the protocol.
pub async fn start_server() -> Result<()> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(JlfmtLanguageServer::new);

    log::info!("starting jlfmt language server on stdio");

    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}

/// Start the language server over TCP (useful for debugging).
pub async fn start_tcp_server(port: u16) -> Result<()> {
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    log::info!("jlfmt language server listening on 127.0.0.1:{port}");

    loop {
        let (stream, _) = listener.accept().await?;
        let (service, socket) = LspService::new(JlfmtLanguageServer::new);

        tokio::spawn(async move {
            let (read, write) = tokio::io::split(stream);
            Server::new(read, write, socket).serve(service).await;
        });
    }
}
