//! Loads a pokedex through the ingestion adapter, watching writes with hooks,
//! then picks the strongest attacker and defender.
//!
//! ```text
//! RUST_LOG=hookstore=trace cargo run --example pokedex [path/to/data.json]
//! ```

use hookstore::{
    AfterSet, BeforeSet, Keyed, Loader, RecordStore, StoreAdapter, StoreConfig, StoreError,
};
use serde::Deserialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Deserialize)]
struct Pokemon {
    id: String,
    attack: u32,
    defense: u32,
}

impl Keyed for Pokemon {
    type Key = String;

    fn key(&self) -> &String {
        &self.id
    }
}

fn main() -> hookstore::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data.json")));

    let store = RecordStore::with_config(StoreConfig {
        name: "pokedex".to_string(),
        ..Default::default()
    });

    store.on_before_add(|event: &BeforeSet<Pokemon>| {
        if event.incoming.id.is_empty() {
            return Err(StoreError::InvalidRecord("pokemon without an id".to_string()));
        }
        match &event.prior {
            Some(prior) => println!("replacing {:?} with {:?}", prior, event.incoming),
            None => println!("adding {:?}", event.incoming),
        }
        Ok(())
    });
    let watcher = store.on_after_add(|event: &AfterSet<Pokemon>| {
        println!("stored {}", event.committed.id);
        Ok(())
    });

    let report = Loader::default().load_file(&path, &StoreAdapter::new(&store))?;
    watcher.unsubscribe();
    println!("loaded {} records from {}", report.loaded, path.display());

    store.visit(|pokemon, idx| println!("{:>3}: {:?}", idx, pokemon));

    if let Some(best) = store.select_best(|p| p.defense) {
        println!("Best defense = {}", best.id);
    }
    if let Some(best) = store.select_best(|p| p.attack) {
        println!("Best attack = {}", best.id);
    }

    Ok(())
}
