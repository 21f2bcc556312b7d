use async_trait::async_trait;
use resource_actor::{
    load_collection, ActorEntity, FileStore, FrameworkError, MemoryStore, ResourceActor,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Counter {
    id: u32,
    name: String,
    value: i64,
}

#[derive(Debug)]
struct CounterCreate(String);

#[derive(Debug)]
enum CounterAction {
    Add(i64),
}

#[derive(Debug, thiserror::Error)]
#[error("counter would go negative")]
struct CounterError;

#[async_trait]
impl ActorEntity for Counter {
    type Id = u32;
    type Create = CounterCreate;
    type Update = String;
    type Action = CounterAction;
    type ActionResult = i64;
    type Context = ();
    type Error = CounterError;

    fn id(&self) -> u32 {
        self.id
    }

    fn from_create_params(id: u32, params: CounterCreate) -> Result<Self, CounterError> {
        Ok(Self {
            id,
            name: params.0,
            value: 0,
        })
    }

    async fn on_update(&mut self, name: String, _ctx: &()) -> Result<(), CounterError> {
        self.name = name;
        Ok(())
    }

    async fn handle_action(&mut self, action: CounterAction, _ctx: &()) -> Result<i64, CounterError> {
        let CounterAction::Add(delta) = action;
        if self.value + delta < 0 {
            return Err(CounterError);
        }
        self.value += delta;
        Ok(self.value)
    }
}

/// A collection written through a FileStore is picked up again by a new actor, and
/// new ids continue after the highest stored one.
#[tokio::test]
async fn test_file_store_survives_actor_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = FileStore::open(dir.path()).await.unwrap();
        let (actor, client) = ResourceActor::<Counter>::new(8, Arc::new(store), "@counters");
        let handle = tokio::spawn(actor.run(()));

        let a = client.create(CounterCreate("mesas".into())).await.unwrap();
        let b = client.create(CounterCreate("pedidos".into())).await.unwrap();
        client.perform_action(b, CounterAction::Add(3)).await.unwrap();
        client.delete(a).await.unwrap();

        drop(client);
        handle.await.unwrap();
    }

    let store = FileStore::open(dir.path()).await.unwrap();
    let stored: Vec<Counter> = load_collection(&store, "@counters").await.unwrap();
    assert_eq!(
        stored,
        vec![Counter {
            id: 2,
            name: "pedidos".into(),
            value: 3
        }]
    );

    let (actor, client) = ResourceActor::<Counter>::new(8, Arc::new(store), "@counters");
    let handle = tokio::spawn(actor.with_items(stored).run(()));

    let c = client.create(CounterCreate("platos".into())).await.unwrap();
    assert_eq!(c, 3);
    assert_eq!(client.list().await.unwrap().len(), 2);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_entity_errors_come_back_boxed() {
    let store = MemoryStore::new();
    let (actor, client) = ResourceActor::<Counter>::new(8, Arc::new(store.clone()), "@counters");
    let handle = tokio::spawn(actor.run(()));

    let id = client.create(CounterCreate("caja".into())).await.unwrap();
    let err = client
        .perform_action(id, CounterAction::Add(-1))
        .await
        .unwrap_err();
    match err {
        FrameworkError::EntityError(e) => assert!(e.downcast_ref::<CounterError>().is_some()),
        other => panic!("unexpected error: {other:?}"),
    }

    let missing = client.update(99, "x".into()).await.unwrap_err();
    assert!(matches!(missing, FrameworkError::NotFound(ref id) if id == "99"));

    drop(client);
    handle.await.unwrap();
}
