//! Atomicity of rotation and id assignment under concurrent access.

mod support;

use std::collections::HashSet;

use credplane::secrets::CredentialSet;
use support::{create_request, setup_service, ACTOR};

fn triples_equal(a: &CredentialSet, b: &CredentialSet) -> bool {
    a.secret_key == b.secret_key
        && a.access_token == b.access_token
        && a.shared_key == b.shared_key
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn reads_during_rotation_never_observe_a_mixed_triple() {
    let harness = setup_service();
    let created = harness
        .service
        .create_config(create_request("AHIS", 1, "ACTIVE"), ACTOR)
        .await
        .unwrap();
    let id = created.id;
    let initial = created.credential_set();

    let mut rotations = Vec::new();
    for _ in 0..8 {
        let service = harness.service.clone();
        rotations.push(tokio::spawn(async move {
            service.rotate_keys(id, ACTOR).await.unwrap().credential_set()
        }));
    }

    let mut readers = Vec::new();
    for _ in 0..16 {
        let service = harness.service.clone();
        readers.push(tokio::spawn(async move {
            let mut observed = Vec::new();
            for _ in 0..25 {
                observed.push(service.get_config(id).await.unwrap().credential_set());
                tokio::task::yield_now().await;
            }
            observed
        }));
    }

    let mut valid_triples = vec![initial];
    for rotation in rotations {
        valid_triples.push(rotation.await.unwrap());
    }

    for reader in readers {
        for observed in reader.await.unwrap() {
            assert!(
                valid_triples.iter().any(|valid| triples_equal(valid, &observed)),
                "read observed a partially rotated credential triple"
            );
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_receive_unique_ids() {
    let harness = setup_service();

    let mut creates = Vec::new();
    for n in 0..32 {
        let service = harness.service.clone();
        creates.push(tokio::spawn(async move {
            service
                .create_config(create_request(&format!("client_{n}"), 1, "PENDING"), ACTOR)
                .await
                .unwrap()
                .id
                .as_i64()
        }));
    }

    let mut ids = HashSet::new();
    for create in creates {
        assert!(ids.insert(create.await.unwrap()), "duplicate id assigned");
    }
    assert_eq!(ids.len(), 32);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_rotations_all_leave_a_complete_triple() {
    let harness = setup_service();
    let created = harness
        .service
        .create_config(create_request("AHCC", 1, "ACTIVE"), ACTOR)
        .await
        .unwrap();
    let id = created.id;

    let mut rotations = Vec::new();
    for _ in 0..10 {
        let service = harness.service.clone();
        rotations.push(tokio::spawn(async move { service.rotate_keys(id, ACTOR).await }));
    }
    for rotation in rotations {
        rotation.await.unwrap().unwrap();
    }

    let final_state = harness.service.get_config(id).await.unwrap();
    // One of the ten rotations won; whichever did, the stored triple is the
    // complete output of a single rotation at the policy lengths.
    assert_eq!(final_state.client_secret_key.len(), 32);
    assert_eq!(final_state.client_access_token.len(), 48);
    assert_eq!(final_state.client_shared_key.len(), 24);
    assert_eq!(final_state.created_at, created.created_at);
    assert!(final_state.updated_at > created.updated_at);
}
