//! `launchpack manifest` command

use anyhow::Result;

use crate::cli::{GlobalArgs, ManifestArgs};
use crate::commands::Session;
use launchpack::ops::{JsonBackend, PackagingBackend};
use launchpack::util::shell::Status;

pub fn execute(global: &GlobalArgs, args: ManifestArgs) -> Result<()> {
    let session = Session::new(global)?;
    let outcome = session.build(&args.platform, args.strict)?;
    let request = session.request(outcome)?;

    let backend = JsonBackend::new(args.output);
    let report = backend.package(&request)?;

    if let Some(path) = &report.output {
        session.shell.status(
            Status::Created,
            format!("{} ({} files)", path.display(), report.files),
        );
    }

    Ok(())
}
