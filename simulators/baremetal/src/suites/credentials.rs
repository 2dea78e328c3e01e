use ironsim::types::CredentialBlob;
use ironsim::utils::{into_changes, rand_name};
use ironsim::{dyn_async, CredentialArgs, TestContext};
use serde_json::json;

use crate::suites::environment::CredentialOwner;

fn credential_args(access_key: &str, secret_key: &str) -> ironsim::Result<CredentialArgs> {
    let owner = CredentialOwner::from_env()?;
    Ok(CredentialArgs {
        access_key: access_key.to_string(),
        secret_key: secret_key.to_string(),
        user_id: owner.user_id,
        project_id: owner.project_id,
        expect_errors: false,
    })
}

dyn_async! {
    pub async fn test_credential_blob_round_trip<'a>(ctx: &'a mut TestContext) -> ironsim::Result<()> {
        let (access, secret) = (rand_name("access"), rand_name("secret"));
        let created = ctx.create_credential(credential_args(&access, &secret)?).await?.body;
        let id = created.id.expect("created credential has an id");

        let fetched = ctx.credentials_client()?.show_credential(&id).await?.body;
        assert_eq!(fetched.blob, CredentialBlob { access, secret });
        assert_eq!(fetched.kind, "ec2");
        Ok(())
    }
}

dyn_async! {
    pub async fn test_update_credential<'a>(ctx: &'a mut TestContext) -> ironsim::Result<()> {
        let access = rand_name("access");
        let created = ctx
            .create_credential(credential_args(&access, &rand_name("secret"))?)
            .await?
            .body;
        let id = created.id.expect("created credential has an id");

        let secret = rand_name("secret");
        let changes = into_changes(json!({ "secret_key": secret }));
        let updated = ctx.credentials_client()?.update_credential(&id, &changes).await?.body;

        assert_eq!(updated.blob, CredentialBlob { access, secret });
        assert_eq!(updated.user_id, created.user_id);
        Ok(())
    }
}

dyn_async! {
    pub async fn test_list_credentials<'a>(ctx: &'a mut TestContext) -> ironsim::Result<()> {
        let created = ctx
            .create_credential(credential_args(&rand_name("access"), &rand_name("secret"))?)
            .await?
            .body;
        let id = created.id.expect("created credential has an id");

        let listed = ctx.credentials_client()?.list_credentials().await?.body;
        let Some(entry) = listed.iter().find(|credential| credential.id.as_deref() == Some(id.as_str())) else {
            panic!("credential {id} missing from listing");
        };
        assert_eq!(entry.blob, created.blob);
        Ok(())
    }
}
