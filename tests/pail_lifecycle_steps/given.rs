//! Given steps for pail lifecycle BDD scenarios.

use super::world::PailWorld;
use eyre::WrapErr;
use pail::pail::domain::{PailDocument, PailName, PailStatus};
use rstest_bdd_macros::given;

#[given("an empty pail store")]
fn empty_store(world: &mut PailWorld) -> Result<(), eyre::Report> {
    let listed = world.store.list().wrap_err("list fresh store")?;
    eyre::ensure!(listed.is_empty(), "fresh store should be empty, got {listed:?}");
    Ok(())
}

#[given(r#"a pail named "{name}" that has succeeded"#)]
fn succeeded_pail(world: &mut PailWorld, name: String) -> Result<(), eyre::Report> {
    let pail_name = PailName::new(name.as_str())?;
    let created = world
        .store
        .create(PailDocument::new().with_name(&pail_name))
        .wrap_err("create pail for scenario setup")?;
    let id = created.require_id()?;
    world
        .store
        .update(created.with_status(PailStatus::Succeeded))
        .wrap_err("finish pail for scenario setup")?;
    world.named.insert(name, id);
    Ok(())
}
