use anyhow::Result;
use unredact_config::Config;

use super::{build_document, format_rendered};
use crate::cli::DocumentArgs;

pub fn handle(args: DocumentArgs, config: &Config) -> Result<()> {
    let document = build_document(&args)?;
    let text = document.classified_text();

    println!("{}", format_rendered(&document.rendered_text(), config.mask.glyph));
    println!();
    println!("  Words:    {}", text.len());
    println!("  Redacted: {:?}", text.redacted_indices());
    println!("  Masked:   {}", text.mask_token_text(&config.mask.token));
    println!("  Payload:  text={}", text.url_text(&config.mask.token));

    Ok(())
}
