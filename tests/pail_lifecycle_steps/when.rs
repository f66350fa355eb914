//! When steps for pail lifecycle BDD scenarios.

use super::world::PailWorld;
use eyre::WrapErr;
use pail::pail::domain::{PailDocument, PailName, PailStatus};
use rstest_bdd_macros::when;

#[when(r#"a pail named "{name}" is created"#)]
fn create_named(world: &mut PailWorld, name: String) -> Result<(), eyre::Report> {
    let pail_name = PailName::new(name.as_str())?;
    let created = world
        .store
        .create(PailDocument::new().with_name(&pail_name))
        .wrap_err("create named pail")?;
    world.named.insert(name, created.require_id()?);
    world.current = Some(created);
    Ok(())
}

#[when(r#"another pail named "{name}" is requested"#)]
fn request_duplicate(world: &mut PailWorld, name: String) -> Result<(), eyre::Report> {
    let pail_name = PailName::new(name)?;
    world.last_result = Some(world.store.create(PailDocument::new().with_name(&pail_name)));
    Ok(())
}

#[when(r#"the pail is updated with status "{status}""#)]
fn update_status(world: &mut PailWorld, status: String) -> Result<(), eyre::Report> {
    let incoming = PailStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let document = world
        .current
        .take()
        .ok_or_else(|| eyre::eyre!("no pail created in scenario world"))?;
    let updated = world
        .store
        .update(document.with_status(incoming))
        .wrap_err("update pail status")?;
    world.current = Some(updated);
    Ok(())
}

#[when("the pail is deleted")]
fn delete_pail(world: &mut PailWorld) -> Result<(), eyre::Report> {
    let id = world.current_id()?;
    world.store.delete(id).wrap_err("delete pail")?;
    Ok(())
}
