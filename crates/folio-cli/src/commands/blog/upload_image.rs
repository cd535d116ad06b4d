//! Image upload command implementation.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;

use crate::commands::read_local_file;
use crate::output;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct UploadImageArgs {
    /// JPEG, PNG or WebP file, at most 5 MiB
    pub path: PathBuf,
}

pub async fn run(args: UploadImageArgs, ctx: &Context) -> Result<()> {
    let file = read_local_file(&args.path).await?;
    let client = ctx.signed_in_client()?;

    let url = client
        .blogs()
        .upload_image(&file.name, file.content_type, file.bytes)
        .await
        .context("Failed to upload image")?;

    output::success("Image uploaded");
    output::field("URL", &url);
    Ok(())
}
