use crate::app::App;
use anyhow::Result;
use crewboard_core::catalog::WorkerKind;
use crewboard_core::session::{Identity, Page};

pub fn login_admin(app: &mut App, password: &str) -> Result<()> {
    let identity = app.session.login_admin(password, &app.catalog)?;
    println!("logged in as {} (admin)", identity.id());
    Ok(())
}

pub fn login_worker(app: &mut App, id: &str, kind: WorkerKind) -> Result<()> {
    if !app
        .catalog
        .list_workers()
        .iter()
        .any(|w| w.id == id && w.kind == kind)
    {
        tracing::warn!(id, %kind, "logging in as someone outside the worker list");
    }

    let identity = app.session.login_worker(id, kind)?;
    println!("logged in as {} ({})", identity.id(), kind);
    Ok(())
}

pub fn logout(app: &mut App) -> Result<()> {
    app.session.logout()?;
    println!("logged out");
    Ok(())
}

pub fn whoami(app: &App) {
    match app.session.current_user() {
        None => println!("not logged in"),
        Some(Identity::Admin { id }) => println!("{} (admin)", id),
        Some(Identity::Worker { id, worker_kind }) => {
            let name = app
                .catalog
                .entity((*worker_kind).into(), id)
                .map_or(id.as_str(), |e| e.latest_name());
            println!("{} ({})", name, worker_kind);
        }
    }
}

pub fn open(app: &mut App, page: Page) -> Result<()> {
    let page = app.session.open_page(page)?;
    println!("{}", page.title());
    Ok(())
}

pub fn passwd(app: &mut App, current: &str, new: &str) -> Result<()> {
    app.session.change_password(current, new)?;
    println!("password changed");
    Ok(())
}
