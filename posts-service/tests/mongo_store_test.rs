//! Exercises the MongoDB-backed store. Needs a reachable server:
//! `MONGODB_URI=mongodb://localhost:27017 cargo test -- --ignored`

use posts_service::models::{NewPost, PostChanges};
use posts_service::services::{MongoDb, PostStore};
use uuid::Uuid;

struct TestDb {
    db: MongoDb,
    name: String,
}

impl TestDb {
    async fn connect() -> Self {
        dotenvy::dotenv().ok();
        let uri =
            std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".into());
        let name = format!("posts_test_{}", Uuid::new_v4().simple());
        let db = MongoDb::connect(&uri, &name)
            .await
            .expect("Failed to connect to MongoDB");
        TestDb { db, name }
    }

    async fn cleanup(&self) {
        let _ = self.db.client().database(&self.name).drop(None).await;
    }
}

fn new_post(title: &str, content: &str) -> NewPost {
    NewPost {
        title: title.to_string(),
        content: content.to_string(),
    }
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn insert_then_find_by_id() {
    let test = TestDb::connect().await;

    let created = test.db.insert(new_post("A", "B")).await.unwrap();
    let found = test.db.find_by_id(created.id).await.unwrap();
    assert_eq!(found, Some(created));

    test.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn pages_follow_id_order() {
    let test = TestDb::connect().await;

    for i in 0..5 {
        test.db
            .insert(new_post(&format!("post {}", i), "body"))
            .await
            .unwrap();
    }

    let all = test.db.find_all().await.unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(test.db.find_page(2, 2).await.unwrap(), all[2..4].to_vec());
    assert_eq!(test.db.find_page(4, 2).await.unwrap(), all[4..].to_vec());

    test.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn partial_update_and_delete() {
    let test = TestDb::connect().await;
    let created = test.db.insert(new_post("title", "content")).await.unwrap();

    let matched = test
        .db
        .update(
            created.id,
            PostChanges {
                title: None,
                content: Some("changed".to_string()),
            },
        )
        .await
        .unwrap();
    assert!(matched);
    assert!(test.db.update(created.id, PostChanges::default()).await.unwrap());

    let post = test.db.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(post.title, "title");
    assert_eq!(post.content, "changed");

    assert!(test.db.delete(created.id).await.unwrap());
    assert!(!test.db.delete(created.id).await.unwrap());
    assert!(test.db.find_by_id(created.id).await.unwrap().is_none());

    test.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn health_check_pings_server() {
    let test = TestDb::connect().await;
    test.db.health_check().await.unwrap();
    test.cleanup().await;
}
