use clap::Parser;
use color_eyre::eyre::bail;
use learnchat::{
    openai::OpenAiClient,
    prompt::Variant,
    services::{chat::ChatService, remote::RemoteChat, ChatBackend},
    AppState,
};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Model provider API key. Required unless --endpoint is set.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// Model used for chat completions.
    #[arg(long, env, default_value = learnchat::names::DEFAULT_MODEL)]
    model: String,

    /// Base URL of the OpenAI-compatible provider API.
    #[arg(long, env, default_value = learnchat::names::DEFAULT_PROVIDER_URL)]
    provider_url: String,

    /// System prompt and tool set to run with.
    #[arg(long, env, value_enum, default_value_t = Variant::Tutor)]
    variant: Variant,

    /// Forward chat requests to this remote endpoint instead of calling the provider.
    #[arg(long, env = "CHAT_ENDPOINT")]
    endpoint: Option<String>,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:3000")]
    address: String,

    /// Mark cookies as Secure (serve behind HTTPS).
    #[arg(long, env, default_value_t = false)]
    secure_cookies: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,learnchat=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let chat = match (args.endpoint, args.openai_api_key) {
        (Some(endpoint), _) => {
            let remote = RemoteChat::new(endpoint);
            tracing::info!("forwarding chat requests to {}", remote.endpoint());
            ChatBackend::Remote(remote)
        }
        (None, Some(api_key)) => {
            let client = OpenAiClient::new(api_key)
                .with_model(args.model)
                .with_base_url(args.provider_url);
            let model = client.model().to_string();
            let service = ChatService::new(client, args.variant);
            tracing::info!(
                "using model {model} with the {:?} variant",
                service.variant()
            );
            ChatBackend::Local(service)
        }
        (None, None) => bail!("set OPENAI_API_KEY or pass --endpoint"),
    };

    let app = learnchat::router(AppState::new(chat, args.secure_cookies));

    let address = args.address.parse::<std::net::SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("listening on http://{address}");
    axum::serve(listener, app).await?;

    Ok(())
}
