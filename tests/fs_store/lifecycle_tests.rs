//! Lifecycle tests against a real store root.

use super::helpers::{StoreSite, name, site};
use eyre::{Result, bail, ensure};
use pail::pail::{
    domain::{PailDocument, PailName, PailStatus, Timestamp},
    services::PailStoreError,
};
use rstest::rstest;

#[rstest]
fn named_pail_runs_to_success_and_is_cleaned_up(site: StoreSite) -> Result<()> {
    let store = site.store();
    let created = store.create(PailDocument::new().with_name(&name("build1")))?;
    let id = created.require_id()?;

    let started = store.update(created.with_status(PailStatus::Starting))?;
    ensure!(started.status() == Some(PailStatus::Started), "starting normalized");
    ensure!(
        started.timestamp(Timestamp::Finish).is_none(),
        "finishTime absent while running"
    );

    let finished = store.update(started.with_status(PailStatus::Succeeded))?;
    ensure!(finished.timestamp(Timestamp::Finish).is_some(), "finishTime set");

    let listed = store.list()?;
    ensure!(
        listed.iter().filter(|listed_id| **listed_id == id).count() == 1,
        "id listed exactly once in {listed:?}"
    );
    ensure!(store.resolve(&PailName::last())? == Some(id), "last set");
    ensure!(store.resolve(&PailName::last_success())? == Some(id), "lastSuccess set");
    ensure!(store.links_for(id)?.len() == 3, "build1, last, lastSuccess");

    store.delete(id)?;
    ensure!(!store.list()?.contains(&id), "id no longer listed");
    for gone in [name("build1"), PailName::last(), PailName::last_success()] {
        ensure!(store.resolve(&gone)?.is_none(), "{gone} should be gone");
        ensure!(
            std::fs::symlink_metadata(site.root().join(gone.as_str())).is_err(),
            "{gone} link removed from disk"
        );
    }
    ensure!(!site.root().join(id.to_string()).exists(), "record directory removed");
    Ok(())
}

#[rstest]
fn duplicate_name_does_not_create_a_second_directory(site: StoreSite) -> Result<()> {
    let store = site.store();
    store.create(PailDocument::new().with_name(&name("build1")))?;

    match store.create(PailDocument::new().with_name(&name("build1"))) {
        Err(PailStoreError::NameConflict(_)) => {}
        other => bail!("expected NameConflict, got {other:?}"),
    }
    let directories = std::fs::read_dir(site.root())?
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_dir()))
        .count();
    ensure!(directories == 1, "one record directory expected, got {directories}");
    Ok(())
}

#[rstest]
fn name_occupied_by_a_plain_file_conflicts(site: StoreSite) -> Result<()> {
    std::fs::create_dir_all(site.root())?;
    std::fs::write(site.root().join("notes"), "not a link")?;

    match site.store().create(PailDocument::new().with_name(&name("notes"))) {
        Err(PailStoreError::NameConflict(conflict)) => {
            ensure!(conflict.as_str() == "notes", "conflict names the file");
        }
        other => bail!("expected NameConflict, got {other:?}"),
    }
    Ok(())
}

#[rstest]
fn rename_swaps_links_on_disk(site: StoreSite) -> Result<()> {
    let store = site.store();
    let created = store.create(PailDocument::new().with_name(&name("old")))?;
    let id = created.require_id()?;

    store.update(created.with_name(&name("new")))?;
    ensure!(
        std::fs::symlink_metadata(site.root().join("old")).is_err(),
        "old link removed"
    );
    let target = std::fs::read_link(site.root().join("new"))?;
    ensure!(
        target.to_str() == Some(id.to_string().as_str()),
        "new link targets the bare id, got {target:?}"
    );
    ensure!(site.root().join(id.to_string()).is_dir(), "record never moves");
    Ok(())
}

#[rstest]
fn explicit_names_can_be_set_and_removed(site: StoreSite) -> Result<()> {
    let store = site.store();
    let id = store.create(PailDocument::new())?.require_id()?;

    store.set_name(id, &name("pinned"))?;
    ensure!(store.read_by_name(&name("pinned"))?.is_some(), "name resolves");
    ensure!(store.remove_name(&name("pinned"))?, "name removed");
    ensure!(!store.remove_name(&name("pinned"))?, "second removal is a miss");
    Ok(())
}

#[rstest]
fn second_store_over_the_same_root_sees_the_records(site: StoreSite) -> Result<()> {
    let created = site
        .store()
        .create(PailDocument::new().with_name(&name("shared")).with_field("owner", "ci"))?;

    let reopened = site.store();
    let found = reopened.read_by_name(&name("shared"))?;
    ensure!(found == Some(created), "documents survive store reconstruction");
    Ok(())
}
