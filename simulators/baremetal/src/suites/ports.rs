use ironsim::types::NodeSpec;
use ironsim::utils::{into_changes, rand_mac_address};
use ironsim::{dyn_async, PortArgs, TestContext};
use regex::Regex;
use serde_json::json;

async fn create_node(ctx: &mut TestContext) -> ironsim::Result<String> {
    let node = ctx.create_node(NodeSpec::default()).await?.body;
    Ok(node.uuid.expect("created node has a uuid"))
}

dyn_async! {
    pub async fn test_create_port<'a>(ctx: &'a mut TestContext) -> ironsim::Result<()> {
        let node_uuid = create_node(ctx).await?;
        let address = rand_mac_address();

        let port = ctx
            .create_port(PortArgs {
                address: Some(address.clone()),
                node_uuid: Some(node_uuid),
                ..Default::default()
            })
            .await?
            .body;

        assert_eq!(port.address, Some(address));
        Ok(())
    }
}

dyn_async! {
    pub async fn test_create_port_default_address<'a>(ctx: &'a mut TestContext) -> ironsim::Result<()> {
        let node_uuid = create_node(ctx).await?;
        let port = ctx
            .create_port(PortArgs {
                node_uuid: Some(node_uuid),
                ..Default::default()
            })
            .await?
            .body;

        let mac = Regex::new("^[0-9a-fA-F]{2}(:[0-9a-fA-F]{2}){5}$").expect("valid MAC pattern");
        let address = port.address.expect("port has an address");
        assert!(mac.is_match(&address), "{address} is not a MAC address");
        Ok(())
    }
}

dyn_async! {
    pub async fn test_update_port<'a>(ctx: &'a mut TestContext) -> ironsim::Result<()> {
        let node_uuid = create_node(ctx).await?;
        let uuid = ctx
            .create_port(PortArgs {
                node_uuid: Some(node_uuid),
                ..Default::default()
            })
            .await?
            .body
            .uuid
            .expect("created port has a uuid");

        let address = rand_mac_address();
        let changes = into_changes(json!({ "address": address }));
        let port = ctx.client().update_port(&uuid, &changes).await?.body;

        assert_eq!(port.address, Some(address));
        Ok(())
    }
}
