//! On-disk layout tests: document format, listing filters and link forms.

use super::helpers::{FsStore, StoreSite, name, site, store_for};
use eyre::{Result, WrapErr, ensure};
use pail::{
    config::PailConfig,
    pail::{
        adapters::fs::FsPailRepository,
        domain::{PailDocument, PailId},
        ports::{PailRepository, PailRepositoryError},
    },
};
use rstest::rstest;
use serde_json::Value;

fn create_plain(store: &FsStore) -> Result<PailId> {
    Ok(store.create(PailDocument::new())?.require_id()?)
}

#[rstest]
fn document_is_written_pretty_printed_under_the_record(site: StoreSite) -> Result<()> {
    let store = site.store();
    let id = create_plain(&store)?;

    let path = site.root().join(id.to_string()).join("config.json");
    let raw = std::fs::read_to_string(&path).wrap_err("read stored document")?;
    ensure!(raw.contains("\n    \"id\""), "four-space indentation expected:\n{raw}");

    let parsed: Value = serde_json::from_str(&raw)?;
    ensure!(
        parsed.get("id").and_then(Value::as_str) == Some(id.to_string().as_str()),
        "id stored in the document"
    );
    ensure!(
        parsed.get("status").and_then(Value::as_str) == Some("created"),
        "status stored in the document"
    );
    Ok(())
}

#[rstest]
fn configured_document_name_is_used(site: StoreSite) -> Result<()> {
    let config = site.config.clone().with_config_file("pail.json");
    let store = store_for(&config);
    let id = create_plain(&store)?;

    ensure!(
        site.root().join(id.to_string()).join("pail.json").is_file(),
        "document written under the configured name"
    );
    ensure!(store.read(id)?.is_some(), "document read back");
    Ok(())
}

#[rstest]
fn missing_root_reads_as_empty(site: StoreSite) -> Result<()> {
    let store = site.store();
    ensure!(store.list()?.is_empty(), "no records");
    ensure!(store.read(PailId::new())?.is_none(), "no document");
    ensure!(store.resolve(&name("build1"))?.is_none(), "no names");
    ensure!(store.links_for(PailId::new())?.is_empty(), "no links");
    store.delete(PailId::new())?;
    ensure!(!site.root().exists(), "reads never create the root");
    Ok(())
}

#[rstest]
fn list_ignores_links_files_and_other_directories(site: StoreSite) -> Result<()> {
    let store = site.store();
    let id = create_plain(&store)?;
    store.set_name(id, &name("alias"))?;
    std::fs::create_dir_all(site.root().join("workspace"))?;
    std::fs::write(site.root().join("README"), "notes")?;

    ensure!(store.list()? == vec![id], "only the record directory is listed");
    Ok(())
}

#[rstest]
fn non_canonical_record_directories_are_not_listed(site: StoreSite) -> Result<()> {
    let store = site.store();
    let id = create_plain(&store)?;
    let upper = id.to_string().to_uppercase();
    std::fs::rename(site.root().join(id.to_string()), site.root().join(&upper))?;

    ensure!(store.list()?.is_empty(), "an id that cannot be read is never listed");
    ensure!(store.read(id)?.is_none(), "canonical path is absent");

    let kept = create_plain(&store)?;
    store.delete(kept)?;
    ensure!(store.list()?.is_empty(), "deleted records leave the listing");
    ensure!(site.root().join(&upper).is_dir(), "foreign directory left alone");
    Ok(())
}

#[rstest]
fn link_to_uppercase_id_does_not_resolve(site: StoreSite) -> Result<()> {
    let store = site.store();
    let id = create_plain(&store)?;
    std::fs::create_dir_all(site.root())?;
    std::os::unix::fs::symlink(
        id.to_string().to_uppercase(),
        site.root().join("shouting"),
    )?;

    ensure!(store.resolve(&name("shouting"))?.is_none(), "target must be canonical");
    ensure!(store.links_for(id)?.is_empty(), "not counted among the links");
    Ok(())
}

#[rstest]
fn link_with_full_record_path_resolves(site: StoreSite) -> Result<()> {
    let store = site.store();
    let id = create_plain(&store)?;
    let record = site.root().join(id.to_string());
    std::os::unix::fs::symlink(record.as_std_path(), site.root().join("legacy"))?;

    ensure!(store.resolve(&name("legacy"))? == Some(id), "full path target resolves");
    ensure!(
        store.links_for(id)? == vec![name("legacy")],
        "full path target is listed for the id"
    );
    store.delete(id)?;
    ensure!(
        std::fs::symlink_metadata(site.root().join("legacy")).is_err(),
        "legacy link removed on delete"
    );
    Ok(())
}

#[rstest]
fn link_to_something_else_resolves_to_nothing(site: StoreSite) -> Result<()> {
    std::fs::create_dir_all(site.root())?;
    std::os::unix::fs::symlink("elsewhere", site.root().join("dangling"))?;
    ensure!(site.store().resolve(&name("dangling"))?.is_none(), "not a pail id");
    Ok(())
}

#[rstest]
fn corrupt_document_is_surfaced(site: StoreSite) -> Result<()> {
    let store = site.store();
    let id = create_plain(&store)?;
    std::fs::write(site.root().join(id.to_string()).join("config.json"), "{ nope")?;

    let repository = FsPailRepository::new(&site.config);
    ensure!(
        matches!(
            repository.find_by_id(id),
            Err(PailRepositoryError::Serialization { .. })
        ),
        "undecodable documents are errors, not misses"
    );
    Ok(())
}

#[rstest]
fn default_configuration_targets_tmp_pail() {
    let config = PailConfig::default();
    assert_eq!(config.root().as_str(), "/tmp/pail");
    assert_eq!(config.config_file, "config.json");
    assert_eq!(config.workspace, "workspace");
}
