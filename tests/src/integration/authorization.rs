//! # Authorization Flows
//!
//! Whole-pipeline scenarios against call-counting in-memory stores:
//!
//! 1. **Authorized writer**: inode update, then data append under the new version
//! 2. **Unauthorized writer**: rejected before the target store is touched
//! 3. **Stale reference**: an older inode version still grants access
//! 4. **Crypto disabled**: blocks forwarded without checks or signatures

#[cfg(test)]
mod tests {
    use dcfs_crypto::verify;
    use dcfs_middleware::test_utils::*;
    use dcfs_middleware::{MiddlewareConfig, MiddlewareService, MutationApi};
    use dcfs_types::{BlockHash, ContentBlock, DataPayload, MutationResponse, Payload};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Deployment {
        inode: RecordingStore,
        data: RecordingStore,
        service: MiddlewareService<RecordingStore, RecordingStore>,
    }

    fn deploy(config: MiddlewareConfig) -> Deployment {
        let inode = RecordingStore::new();
        let data = RecordingStore::new();
        let service =
            MiddlewareService::new(inode.clone(), data.clone(), test_signing_keys(), config);
        Deployment {
            inode,
            data,
            service,
        }
    }

    fn secure() -> Deployment {
        deploy(MiddlewareConfig::default())
    }

    // =============================================================================
    // AUTHORIZED WRITERS
    // =============================================================================

    /// Test: A writes under its own root, C is refused without touching the data store
    #[tokio::test]
    async fn test_owner_and_stranger_against_root() {
        let d = secure();
        let h0 = seed_inode(&d.inode, vec![fixture_identity(0)]);

        let accepted = d
            .service
            .mutate_data(signed_data_block(0, h0.as_str(), b"content"), h0.clone())
            .await
            .unwrap();
        assert!(accepted.success);
        let ledger = accepted.block.unwrap();
        assert_eq!(ledger.content.prev_hash, h0);
        assert_eq!(d.data.put_count(), 1);

        let refused = d
            .service
            .mutate_data(signed_data_block(2, h0.as_str(), b"content"), h0)
            .await
            .unwrap();
        assert_eq!(refused, MutationResponse::rejected());
        assert_eq!(d.data.put_count(), 1);
    }

    /// Test: owner widens the allow-list, the newly listed user appends data
    #[tokio::test]
    async fn test_owner_grants_then_grantee_writes() {
        let d = secure();
        let root = seed_inode(&d.inode, vec![fixture_identity(0)]);

        let grant = signed_inode_block(
            0,
            root.as_str(),
            vec![fixture_identity(0), fixture_identity(1)],
        );
        let granted = d.service.mutate_inode(grant).await.unwrap();
        assert!(granted.success);
        let version = granted.hash.unwrap();

        let append = signed_data_block(1, "", b"hello");
        let written = d
            .service
            .mutate_data(append.clone(), version.clone())
            .await
            .unwrap();

        assert!(written.success);
        let stored = d.data.backing().block(&written.hash.unwrap()).unwrap();
        assert_eq!(stored.content, append);
        assert!(verify(
            &stored,
            fixture_key(DATA_KEY).public_key(),
            &stored.signature
        ));
        assert_eq!(d.inode.backing().leafs(), vec![version]);
    }

    /// Test: consecutive inode versions link through their predecessor
    #[tokio::test]
    async fn test_inode_versions_form_a_chain() {
        let d = secure();
        let root = seed_inode(&d.inode, vec![fixture_identity(0)]);

        let mut head = root.clone();
        let mut versions = vec![root];
        for _ in 0..3 {
            let update = signed_inode_block(0, head.as_str(), vec![fixture_identity(0)]);
            let response = d.service.mutate_inode(update).await.unwrap();
            let ledger = response.block.unwrap();
            assert_eq!(ledger.prev_hash, head);
            head = response.hash.unwrap();
            versions.push(head.clone());
        }

        assert_eq!(d.inode.backing().len(), 4);
        assert_eq!(d.inode.backing().leafs(), vec![head]);
        let timestamps: Vec<i64> = versions[1..]
            .iter()
            .map(|hash| d.inode.backing().block(hash).unwrap().timestamp)
            .collect();
        assert!(timestamps.windows(2).all(|pair| pair[0] < pair[1]));
    }

    // =============================================================================
    // UNAUTHORIZED WRITERS
    // =============================================================================

    /// Test: an unlisted writer is refused and the data store never sees it
    #[tokio::test]
    async fn test_unlisted_writer_never_reaches_store() {
        let d = secure();
        let root = seed_inode(&d.inode, vec![fixture_identity(0)]);

        let response = d
            .service
            .mutate_data(signed_data_block(2, "", b"intruder"), root)
            .await
            .unwrap();

        assert_eq!(response, MutationResponse::rejected());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({ "success": false })
        );
        assert_eq!(d.data.put_count(), 0);
        assert!(d.data.backing().is_empty());
    }

    /// Test: claiming a listed identity without its key fails authentication
    #[tokio::test]
    async fn test_impersonation_rejected() {
        let d = secure();
        let root = seed_inode(&d.inode, vec![fixture_identity(0)]);

        let mut forged = signed_data_block(2, "", b"forged");
        forged.updated_by = fixture_identity(0);
        dcfs_crypto::sign_in_place(&mut forged, fixture_key(2)).unwrap();

        let response = d.service.mutate_data(forged, root).await.unwrap();

        assert!(!response.success);
        assert_eq!(d.inode.get_count(), 0);
        assert_eq!(d.data.put_count(), 0);
    }

    /// Test: the owner can revoke themselves out of later versions
    #[tokio::test]
    async fn test_removed_writer_refused_on_new_version() {
        let d = secure();
        let root = seed_inode(&d.inode, vec![fixture_identity(0)]);
        let handover = signed_inode_block(0, root.as_str(), vec![fixture_identity(1)]);
        let version = d.service.mutate_inode(handover).await.unwrap().hash.unwrap();

        let retry = signed_inode_block(0, version.as_str(), vec![fixture_identity(0)]);
        let response = d.service.mutate_inode(retry).await.unwrap();

        assert!(!response.success);
        assert_eq!(d.inode.put_count(), 1);
    }

    // =============================================================================
    // STALE REFERENCES
    // =============================================================================

    /// Test: a writer dropped from the newest version can still cite an older one
    #[tokio::test]
    async fn test_older_inode_version_still_authorizes() {
        let d = secure();
        let root = seed_inode(&d.inode, vec![fixture_identity(0), fixture_identity(1)]);
        let narrowed = signed_inode_block(0, root.as_str(), vec![fixture_identity(0)]);
        let latest = d.service.mutate_inode(narrowed).await.unwrap().hash.unwrap();

        let via_latest = d
            .service
            .mutate_data(signed_data_block(1, "", b"a"), latest)
            .await
            .unwrap();
        let via_root = d
            .service
            .mutate_data(signed_data_block(1, "", b"b"), root)
            .await
            .unwrap();

        assert!(!via_latest.success);
        assert!(via_root.success);
        assert_eq!(d.data.put_count(), 1);
    }

    // =============================================================================
    // CRYPTO DISABLED
    // =============================================================================

    /// Test: without crypto anything is forwarded unsigned
    #[tokio::test]
    async fn test_crypto_disabled_forwards_everything() {
        let d = deploy(MiddlewareConfig {
            enable_crypto: false,
            ..MiddlewareConfig::default()
        });
        let block = ContentBlock {
            prev_hash: BlockHash::genesis(),
            updated_by: fixture_identity(3),
            signature: Vec::new(),
            payload: Payload::Data(DataPayload {
                data: b"unchecked".to_vec(),
            }),
        };

        let response = d
            .service
            .mutate_data(block, BlockHash::from("nowhere"))
            .await
            .unwrap();

        assert!(response.success);
        assert!(response.block.unwrap().signature.is_empty());
        assert_eq!(d.inode.get_count(), 0);
        assert_eq!(d.data.put_count(), 1);
    }
}
