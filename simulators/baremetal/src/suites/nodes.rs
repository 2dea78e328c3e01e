use ironsim::types::NodeSpec;
use ironsim::utils::into_changes;
use ironsim::{dyn_async, TestContext};
use serde_json::json;

dyn_async! {
    pub async fn test_create_node<'a>(ctx: &'a mut TestContext) -> ironsim::Result<()> {
        let spec = NodeSpec {
            cpu_arch: "x86_64".to_string(),
            cpu_num: 12,
            storage: 10240,
            memory: 1024,
            ..Default::default()
        };
        let node = ctx.create_node(spec.clone()).await?.body;

        assert_eq!(node.properties.cpu_arch, Some(spec.cpu_arch));
        assert_eq!(node.properties.cpu_num, Some(spec.cpu_num));
        assert_eq!(node.properties.storage, Some(spec.storage));
        assert_eq!(node.properties.memory, Some(spec.memory));
        Ok(())
    }
}

dyn_async! {
    pub async fn test_create_node_defaults<'a>(ctx: &'a mut TestContext) -> ironsim::Result<()> {
        let uuid = ctx
            .create_node(NodeSpec::default())
            .await?
            .body
            .uuid
            .expect("created node has a uuid");

        let listed = ctx.client().list_nodes().await?.body;
        assert!(listed.iter().any(|node| node.uuid.as_deref() == Some(uuid.as_str())));

        let node = ctx.client().show_node(&uuid).await?.body;
        assert_eq!(node.properties.cpu_arch.as_deref(), Some("x86_64"));
        assert_eq!(node.properties.cpu_num, Some(8));
        assert_eq!(node.properties.storage, Some(1024));
        assert_eq!(node.properties.memory, Some(4096));
        Ok(())
    }
}

dyn_async! {
    pub async fn test_update_node<'a>(ctx: &'a mut TestContext) -> ironsim::Result<()> {
        let uuid = ctx
            .create_node(NodeSpec::default())
            .await?
            .body
            .uuid
            .expect("created node has a uuid");

        let changes = into_changes(json!({
            "properties/cpu_arch": "arm64",
            "properties/cpu_num": 4,
        }));
        let node = ctx.client().update_node(&uuid, &changes).await?.body;

        assert_eq!(node.properties.cpu_arch.as_deref(), Some("arm64"));
        assert_eq!(node.properties.cpu_num, Some(4));
        assert_eq!(node.properties.memory, Some(4096));
        Ok(())
    }
}
