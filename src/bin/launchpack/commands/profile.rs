//! `launchpack profile` command

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, ProfileArgs};
use crate::commands::Session;
use launchpack::{resolve_profile, WheelTag};

pub fn execute(global: &GlobalArgs, args: ProfileArgs) -> Result<()> {
    let session = Session::new(global)?;
    let host = session.host(&args.platform);
    let profile = resolve_profile(&host, session.config.launcher())
        .map(|p| p.with_overrides(&session.config.profile_overrides()));

    if args.json {
        let doc = serde_json::json!({
            "host": host.to_string(),
            "profile": profile,
            "tag": profile.as_ref().map(|p| WheelTag::from_profile(p).to_string()),
        });
        let json = serde_json::to_string_pretty(&doc).context("failed to serialize profile")?;
        println!("{}", json);
        return Ok(());
    }

    let Some(profile) = profile else {
        session
            .shell
            .warn(format!("no platform profile for host `{}`", host));
        return Ok(());
    };

    println!("host:              {}", host);
    println!("compatibility tag: {}", profile.compatibility_tag);
    println!("interpreter range: {}", profile.interpreter_range_tag);
    println!("abi tag:           {}", profile.abi_tag);
    println!("install prefix:    {}", profile.install_prefix);
    println!("source root:       {}", profile.source_root.display());
    println!("drop count:        {}", profile.drop_count);
    println!("wheel tag:         {}", WheelTag::from_profile(&profile));

    Ok(())
}
