//! # End-to-End Over HTTP
//!
//! Genesis seeds two in-memory stores, each served on its own loopback port.
//! The middleware reaches them through the HTTP store client and is itself
//! served through the mutation router; the test drives it with a plain HTTP
//! client.

#[cfg(test)]
mod tests {
    use crate::integration::harness::{closed_port, loopback_config, RunningServer};
    use dcfs_crypto::verify;
    use dcfs_gateway::{mutation_router, store_router};
    use dcfs_middleware::test_utils::*;
    use dcfs_middleware::{HttpBlockStoreClient, InMemoryBlockStore, MiddlewareConfig, MiddlewareService};
    use dcfs_node::genesis::{build_genesis, write_snapshots, GenesisInputs, GenesisOutput};
    use dcfs_node::runtime::load_snapshot;
    use dcfs_types::{
        BlockHash, GetResponse, LeafsResponse, MutateDataRequest, MutateInodeRequest,
        MutationResponse,
    };
    use serde_json::json;
    use std::sync::Arc;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn genesis() -> GenesisOutput {
        build_genesis(&GenesisInputs {
            client_key: fixture_key(0).clone(),
            client_public_pem: fixture_key(0).public_key().to_pem().unwrap().into_bytes(),
            uid: b"user-0".to_vec(),
            inode_key: fixture_key(INODE_KEY).clone(),
            data_key: fixture_key(DATA_KEY).clone(),
        })
        .unwrap()
    }

    struct Cluster {
        inode_store: RunningServer,
        data_store: RunningServer,
        middleware: RunningServer,
        inode_root: BlockHash,
        http: reqwest::Client,
    }

    impl Cluster {
        async fn start(output: GenesisOutput) -> Self {
            let config = loopback_config();
            let inode_root = output.inode_root.clone();
            let inode_store =
                RunningServer::start(store_router(Arc::new(output.inode_store), &config))
                    .await
                    .unwrap();
            let data_store = RunningServer::start(store_router(Arc::new(output.data_store), &config))
                .await
                .unwrap();

            let service = MiddlewareService::new(
                HttpBlockStoreClient::new(inode_store.url(), None).unwrap(),
                HttpBlockStoreClient::new(data_store.url(), None).unwrap(),
                test_signing_keys(),
                MiddlewareConfig::default(),
            );
            let middleware = RunningServer::start(mutation_router(Arc::new(service), &config))
                .await
                .unwrap();

            Self {
                inode_store,
                data_store,
                middleware,
                inode_root,
                http: reqwest::Client::new(),
            }
        }

        async fn post(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
            self.http
                .post(format!("{}{}", self.middleware.url(), path))
                .json(&body)
                .send()
                .await
                .unwrap()
        }

        async fn stop(self) {
            self.middleware.stop().await.unwrap();
            self.inode_store.stop().await.unwrap();
            self.data_store.stop().await.unwrap();
        }
    }

    // =============================================================================
    // HAPPY PATH
    // =============================================================================

    /// Test: genesis owner appends data and updates the root inode over HTTP
    #[tokio::test]
    async fn test_owner_mutations_over_http() {
        let cluster = Cluster::start(genesis()).await;

        let data_request = MutateDataRequest {
            block: signed_data_block(0, "", b"file body"),
            inode_hash: cluster.inode_root.clone(),
        };
        let response = cluster
            .post("/v1/data", serde_json::to_value(&data_request).unwrap())
            .await;
        assert_eq!(response.status(), 200);
        let written: MutationResponse = response.json().await.unwrap();
        assert!(written.success);
        let data_hash = written.hash.unwrap();

        let stored: GetResponse = cluster
            .http
            .get(format!("{}/blocks/{}", cluster.data_store.url(), data_hash))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(stored.block.content, data_request.block);
        assert!(verify(
            &stored.block,
            fixture_key(DATA_KEY).public_key(),
            &stored.block.signature
        ));

        let inode_request = MutateInodeRequest {
            block: signed_inode_block(
                0,
                cluster.inode_root.as_str(),
                vec![fixture_identity(0), fixture_identity(1)],
            ),
        };
        let updated: MutationResponse = cluster
            .post("/v1/inode", serde_json::to_value(&inode_request).unwrap())
            .await
            .json()
            .await
            .unwrap();
        assert!(updated.success);

        let leafs: LeafsResponse = cluster
            .http
            .get(format!("{}/leafs", cluster.inode_store.url()))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(leafs.leaf_ids, vec![updated.hash.unwrap()]);

        cluster.stop().await;
    }

    // =============================================================================
    // REJECTIONS AND FAILURES
    // =============================================================================

    /// Test: an outsider gets a bare `{"success": false}` and nothing is stored
    #[tokio::test]
    async fn test_outsider_rejected_over_http() {
        let cluster = Cluster::start(genesis()).await;

        let request = MutateDataRequest {
            block: signed_data_block(1, "", b"not yours"),
            inode_hash: cluster.inode_root.clone(),
        };
        let response = cluster
            .post("/v1/data", serde_json::to_value(&request).unwrap())
            .await;

        assert_eq!(response.status(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "success": false }));

        let leafs: LeafsResponse = cluster
            .http
            .get(format!("{}/leafs", cluster.data_store.url()))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(leafs.leaf_ids.len(), 1);

        cluster.stop().await;
    }

    /// Test: a path-shaped inode hash is a plain rejection, not a store outage
    #[tokio::test]
    async fn test_path_traversal_hash_rejected_over_http() {
        let cluster = Cluster::start(genesis()).await;

        let response = cluster
            .post(
                "/v1/data",
                json!({
                    "block": signed_data_block(0, "", b"payload"),
                    "inodeHash": "../leafs",
                }),
            )
            .await;

        assert_eq!(response.status(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "success": false }));

        cluster.stop().await;
    }

    /// Test: an unreachable inode store surfaces as 502, not as a rejection
    #[tokio::test]
    async fn test_unreachable_store_is_bad_gateway() {
        let dead = closed_port().await.unwrap();
        let data_store = RunningServer::start(store_router(
            Arc::new(InMemoryBlockStore::new()),
            &loopback_config(),
        ))
        .await
        .unwrap();
        let service = MiddlewareService::new(
            HttpBlockStoreClient::new(format!("http://{}", dead), None).unwrap(),
            HttpBlockStoreClient::new(data_store.url(), None).unwrap(),
            test_signing_keys(),
            MiddlewareConfig::default(),
        );
        let middleware =
            RunningServer::start(mutation_router(Arc::new(service), &loopback_config()))
                .await
                .unwrap();

        let request = MutateDataRequest {
            block: signed_data_block(0, "", b"payload"),
            inode_hash: BlockHash::from("ab".repeat(32)),
        };
        let response = reqwest::Client::new()
            .post(format!("{}/v1/data", middleware.url()))
            .json(&request)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 502);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "error": "block store unavailable" }));

        middleware.stop().await.unwrap();
        data_store.stop().await.unwrap();
    }

    // =============================================================================
    // SNAPSHOTS
    // =============================================================================

    /// Test: stores reloaded from genesis snapshots serve the same roots
    #[tokio::test]
    async fn test_cluster_from_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let output = genesis();
        let [inode_path, data_path] = write_snapshots(&output, dir.path()).unwrap();

        let reloaded = GenesisOutput {
            identity: output.identity.clone(),
            inode_root: output.inode_root.clone(),
            data_root: output.data_root.clone(),
            inode_store: InMemoryBlockStore::from_snapshot(load_snapshot(&inode_path).unwrap()),
            data_store: InMemoryBlockStore::from_snapshot(load_snapshot(&data_path).unwrap()),
        };
        assert!(reloaded.data_store.contains(&output.data_root));
        let cluster = Cluster::start(reloaded).await;

        let request = MutateDataRequest {
            block: signed_data_block(0, "", b"after restart"),
            inode_hash: output.inode_root.clone(),
        };
        let written: MutationResponse = cluster
            .post("/v1/data", serde_json::to_value(&request).unwrap())
            .await
            .json()
            .await
            .unwrap();

        assert!(written.success);
        cluster.stop().await;
    }
}
