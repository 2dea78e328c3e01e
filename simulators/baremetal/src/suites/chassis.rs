use ironsim::utils::{into_changes, rand_name};
use ironsim::{dyn_async, ChassisArgs, ResourceKind, TestContext};
use serde_json::json;

dyn_async! {
    pub async fn test_create_chassis<'a>(ctx: &'a mut TestContext) -> ironsim::Result<()> {
        let description = rand_name("test-chassis");
        let chassis = ctx
            .create_chassis(ChassisArgs {
                description: Some(description.clone()),
                ..Default::default()
            })
            .await?
            .body;

        assert_eq!(chassis.description, Some(description));
        Ok(())
    }
}

dyn_async! {
    pub async fn test_list_chassis<'a>(ctx: &'a mut TestContext) -> ironsim::Result<()> {
        let created = ctx.create_chassis(ChassisArgs::default()).await?.body;
        let uuid = created.uuid.expect("created chassis has a uuid");

        let listed = ctx.client().list_chassis().await?.body;
        let Some(entry) = listed.iter().find(|chassis| chassis.uuid.as_deref() == Some(uuid.as_str())) else {
            panic!("chassis {uuid} missing from listing");
        };
        assert_eq!(entry.description, created.description);
        Ok(())
    }
}

dyn_async! {
    pub async fn test_update_chassis<'a>(ctx: &'a mut TestContext) -> ironsim::Result<()> {
        let uuid = ctx
            .create_chassis(ChassisArgs::default())
            .await?
            .body
            .uuid
            .expect("created chassis has a uuid");

        let description = rand_name("updated-chassis");
        let changes = into_changes(json!({ "description": description }));
        ctx.client().update_chassis(&uuid, &changes).await?;

        let chassis = ctx.client().show_chassis(&uuid).await?.body;
        assert_eq!(chassis.description, Some(description));
        Ok(())
    }
}

dyn_async! {
    pub async fn test_delete_chassis<'a>(ctx: &'a mut TestContext) -> ironsim::Result<()> {
        let uuid = ctx
            .create_chassis(ChassisArgs::default())
            .await?
            .body
            .uuid
            .expect("created chassis has a uuid");

        let deleted = ctx.delete(ResourceKind::Chassis, &uuid).await?;
        assert!(deleted.is_success(), "delete answered {}", deleted.status);

        let listed = ctx.client().list_chassis().await?.body;
        assert!(listed.iter().all(|chassis| chassis.uuid.as_deref() != Some(uuid.as_str())));
        Ok(())
    }
}
