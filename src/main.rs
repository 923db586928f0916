//! Terminal front end for the assistant widget
//!
//! Reads questions from stdin and prints each new assistant turn.

use rag_assist::markup::{self, Segment};
use rag_assist::{connect, Message, MessageKind, Role, WidgetConfig, WidgetError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never mix with the conversation
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rag_assist=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = WidgetConfig::from_env();
    let widget = connect(&config)?;

    let mut shown = 0;
    print_new(&widget.messages(), &mut shown);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match widget.submit(&line).await {
            Ok(()) => print_new(&widget.messages(), &mut shown),
            Err(WidgetError::EmptyInput) => {}
            Err(e) => tracing::warn!(error = %e, "Submission rejected"),
        }
    }

    Ok(())
}

/// Print assistant turns appended since the last call
fn print_new(messages: &[Message], shown: &mut usize) {
    for message in messages.iter().skip(*shown) {
        if message.role == Role::Assistant {
            println!("{}\n", render(message));
        }
    }
    *shown = messages.len();
}

fn render(message: &Message) -> String {
    let body: String = markup::parse(&message.content)
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => text.clone(),
            Segment::Bold(text) => format!("\x1b[1m{text}\x1b[0m"),
            Segment::Link(link) => format!("{} <{}>", link.text, link.href),
        })
        .collect();

    let label = match message.kind {
        MessageKind::Lead => "assistant (lead)",
        MessageKind::Answer => "assistant",
    };
    let sources: String = message
        .sources
        .iter()
        .flatten()
        .map(|source| format!("\n  - {} <{}>", source.title, source.href))
        .collect();
    format!("{label}> {body}{sources}")
}
