use anyhow::Context as _;

use portico_app::{AppConfig, AppKind, BookStoreContext, ContractManagementContext};
use portico_bookstore::Isbn13;

fn main() -> anyhow::Result<()> {
    portico_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!(app = ?config.app, seed_library = config.seed_library, "starting");

    match config.app {
        AppKind::BookStore => run_book_store(&config),
        AppKind::Contracts => run_contracts(),
    }
}

fn run_book_store(config: &AppConfig) -> anyhow::Result<()> {
    let context = BookStoreContext::start(config)?;
    let isbn13: Isbn13 = "978-3-86490-387-8".parse()?;

    context.service.add_to_stock(&isbn13, 2)?;
    context.service.sell(&isbn13)?;
    context.service.sell(&isbn13)?;

    for message in context.sender.messages() {
        tracing::info!(topic = %message.topic, payload = %message.payload, "outbound message");
    }
    tracing::info!(
        titles = context.service.get_books()?.len(),
        in_stock = context.service.in_stock(&isbn13)?,
        "book store done"
    );
    Ok(())
}

fn run_contracts() -> anyhow::Result<()> {
    let context = ContractManagementContext::new();

    let first = context.service.create_new_contract("Ann")?;
    context.service.create_new_contract("Bob")?;
    context.service.sign_contract(first)?;

    tracing::info!(
        signed = context.service.get_signed_contracts()?.len(),
        unsigned = context.service.get_unsigned_contracts()?.len(),
        audited = context.service.get_all_signed_contracts()?.len(),
        "contracts done"
    );
    Ok(())
}
