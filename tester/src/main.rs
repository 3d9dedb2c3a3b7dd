use anyhow::bail;
use clap::Parser;
use client::{ContactForm, HttpTransport, Status};
use contact::Field;
use tracing_subscriber::{EnvFilter, fmt};

/// Submits one contact to a running intake endpoint.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(long, env = "CONTACT_API_URL", default_value = "http://localhost:5000")]
    url: String,

    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    phone: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();

    let form = ContactForm::new(HttpTransport::new(&args.url));
    form.toggle_visibility();
    form.update_field(Field::Name, args.name);
    form.update_field(Field::Email, args.email);
    form.update_field(Field::Phone, args.phone);

    println!("Posting to {}", args.url);

    match form.submit().await? {
        Status::Success(message) => println!("{message}"),
        Status::Error(message) => bail!("{message}"),
        Status::None => bail!("No status after submitting"),
    }

    Ok(())
}
