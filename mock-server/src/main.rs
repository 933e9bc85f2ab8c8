use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let listener = TcpListener::bind("127.0.0.1:3000").await?;
    println!("echo server listening on {}", listener.local_addr()?);
    mock_server::run(listener).await
}
