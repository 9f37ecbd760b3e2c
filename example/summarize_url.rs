//! Example: Summarize a YouTube video or web page from the command line
//! Run with: GROQ_API_KEY=... cargo run --bin summarize -- youtube https://youtu.be/abc123

use std::env;
use std::process;

use condense::llms::ChatGroq;
use condense::schema::SourceKind;
use condense::summarize::Summarizer;

fn usage() -> ! {
    eprintln!("Usage: summarize <youtube|web> <url>");
    eprintln!("The Groq API key is read from the GROQ_API_KEY environment variable.");
    process::exit(2);
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        usage();
    }

    let kind = match args[1].as_str() {
        "youtube" => SourceKind::Video,
        "web" => SourceKind::WebPage,
        _ => usage(),
    };
    let url = &args[2];

    let api_key = env::var("GROQ_API_KEY").unwrap_or_default();
    let model = match ChatGroq::new(api_key) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Error: {} (set GROQ_API_KEY)", e);
            process::exit(1);
        }
    };

    let summarizer = Summarizer::new(model);
    match summarizer.summarize(url, kind).await {
        Ok(summary) => println!("{}", summary),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
