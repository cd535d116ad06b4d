//! Profile file upload command implementation.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};

use folio_http::ProfileAsset;

use crate::commands::read_local_file;
use crate::output;
use crate::session::Context;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum AssetArg {
    Banner,
    Image,
    Resume,
}

impl From<AssetArg> for ProfileAsset {
    fn from(arg: AssetArg) -> Self {
        match arg {
            AssetArg::Banner => ProfileAsset::Banner,
            AssetArg::Image => ProfileAsset::Image,
            AssetArg::Resume => ProfileAsset::Resume,
        }
    }
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Which file to replace
    #[arg(value_enum)]
    pub asset: AssetArg,

    /// Image for banner and image, PDF or Word document for resume
    pub path: PathBuf,
}

pub async fn run(args: UploadArgs, ctx: &Context) -> Result<()> {
    let file = read_local_file(&args.path).await?;
    let client = ctx.signed_in_client()?;

    let url = client
        .profile()
        .upload(args.asset.into(), &file.name, file.content_type, file.bytes)
        .await
        .context("Failed to upload file")?;

    output::success("Profile updated");
    output::field("URL", &url);
    Ok(())
}
