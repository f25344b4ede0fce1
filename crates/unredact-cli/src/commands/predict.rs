use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::info;
use unredact_client::HttpUnredactionClient;
use unredact_config::Config;
use unredact_engine::Unredactor;

use super::{build_document, format_rendered};
use crate::cli::DocumentArgs;

pub async fn handle(args: DocumentArgs, endpoint: Option<String>, config: &Config) -> Result<()> {
    let mut document = build_document(&args)?;
    if !document.classified_text().has_redactions() {
        println!("Nothing redacted; use --redact or --tap to hide words first.");
        return Ok(());
    }

    let endpoint = endpoint.unwrap_or_else(|| config.service.endpoint.clone());
    let client = HttpUnredactionClient::new(&endpoint, config.request_timeout())?;
    info!(
        document_id = %document.id(),
        endpoint = %client.endpoint(),
        masked = document.classified_text().redacted_indices().len(),
        "requesting predictions"
    );
    let unredactor = Unredactor::new(Arc::new(client), config.unredactor_config());
    let outcome = unredactor.unredact_document(&mut document).await;

    println!("{}", format_rendered(&document.rendered_text(), config.mask.glyph));
    println!();
    println!("  Predicted: {}", outcome.applied);

    if let Some(message) = outcome.error_message() {
        bail!(message);
    }
    Ok(())
}
