use metricsql_lsp::create_service;
use tower_lsp::Server;

#[tokio::main]
async fn main() {
    // stdout carries the LSP stream
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = create_service();
    Server::new(stdin, stdout, socket).serve(service).await;
}
