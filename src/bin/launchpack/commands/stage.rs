//! `launchpack stage` command

use anyhow::Result;

use crate::cli::{GlobalArgs, StageArgs};
use crate::commands::Session;
use launchpack::ops::backend::staging::StageOptions;
use launchpack::ops::{PackagingBackend, StagingBackend};
use launchpack::util::shell::Status;

pub fn execute(global: &GlobalArgs, args: StageArgs) -> Result<()> {
    let session = Session::new(global)?;

    let out_dir = args
        .out
        .or_else(|| {
            session
                .config
                .stage
                .out_dir
                .as_ref()
                .map(|dir| session.project_dir.join(dir))
        })
        .unwrap_or_else(|| session.project_dir.join("stage"));

    let outcome = session.build(&args.platform, args.strict)?;
    let request = session.request(outcome)?;

    if let Some(archive) = request.archive_name() {
        session.shell.status(Status::Packaging, archive);
    }

    let backend = StagingBackend::new(StageOptions::new(&out_dir).with_dry_run(args.dry_run))
        .with_shell(session.shell.clone());
    let report = backend.package(&request)?;

    if args.dry_run {
        session.shell.status(
            Status::Skipped,
            format!("dry run: {} files ({} bytes) not copied", report.files, report.total_size),
        );
    } else {
        session.shell.status(
            Status::Staged,
            format!(
                "{} files ({} bytes) in {}",
                report.files,
                report.total_size,
                out_dir.display()
            ),
        );
    }

    Ok(())
}
