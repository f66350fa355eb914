//! Async wrapper tests over the filesystem store.

use super::helpers::{StoreSite, name, site};
use eyre::{Result, bail, ensure};
use pail::pail::{
    domain::{PailDocument, PailName, PailStatus},
    services::{AsyncPailStore, PailStoreError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn async_wrapper_matches_the_blocking_contract(site: StoreSite) -> Result<()> {
    let store = AsyncPailStore::new(site.store());

    let created = store
        .create(PailDocument::new().with_name(&name("nightly")))
        .await?;
    let id = created.require_id()?;
    let finished = store
        .update(created.with_status(PailStatus::Failed))
        .await?;

    ensure!(store.read(id).await? == Some(finished), "read matches update");
    ensure!(store.list().await? == vec![id], "one record listed");
    ensure!(
        store.resolve(PailName::last_fail()).await? == Some(id),
        "lastFail set"
    );

    store.delete(id).await?;
    ensure!(store.read(id).await?.is_none(), "record removed");
    ensure!(
        store.blocking().resolve(&name("nightly"))?.is_none(),
        "blocking view agrees"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn async_wrapper_reports_name_conflicts(site: StoreSite) -> Result<()> {
    let store = AsyncPailStore::new(site.store());
    store
        .create(PailDocument::new().with_name(&name("nightly")))
        .await?;

    match store
        .create(PailDocument::new().with_name(&name("nightly")))
        .await
    {
        Err(PailStoreError::NameConflict(_)) => Ok(()),
        other => bail!("expected NameConflict, got {other:?}"),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_creates_of_one_name_admit_a_single_winner(site: StoreSite) -> Result<()> {
    let store = AsyncPailStore::new(site.store());
    let attempts: Vec<_> = (0..6)
        .map(|_| {
            let shared = store.clone();
            tokio::spawn(async move {
                shared
                    .create(PailDocument::new().with_name(&name("contended")))
                    .await
            })
        })
        .collect();

    let mut winners = 0;
    for attempt in attempts {
        match attempt.await? {
            Ok(_) => winners += 1,
            Err(PailStoreError::NameConflict(_)) => {}
            Err(other) => bail!("unexpected failure: {other}"),
        }
    }
    ensure!(winners == 1, "exactly one create should win, got {winners}");
    ensure!(store.list().await?.len() == 1, "losers write nothing");
    Ok(())
}
