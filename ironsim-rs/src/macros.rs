/// Declares an `async fn` taking a borrowed [`crate::TestContext`] as a plain
/// function returning a boxed future, so it can be stored in a
/// [`crate::TestSpec`].
///
/// ```ignore
/// dyn_async! {
///     pub async fn test_create_chassis<'a>(ctx: &'a mut TestContext) -> ironsim::Result<()> {
///         let chassis = ctx.create_chassis(ChassisArgs::default()).await?;
///         assert!(chassis.uuid.is_some());
///         Ok(())
///     }
/// }
/// ```
#[macro_export]
macro_rules! dyn_async {(
    $( #[$attr:meta] )*
    $pub:vis
    async
    fn $fname:ident<$lt:lifetime> ( $($args:tt)* ) $(-> $Ret:ty)?
    {
        $($body:tt)*
    }
) => (
    $( #[$attr] )*
    #[allow(unused_parens)]
    $pub
    fn $fname<$lt> ( $($args)* ) -> ::std::pin::Pin<::std::boxed::Box<
        dyn ::std::future::Future<Output = ($($Ret)?)>
            + ::std::marker::Send + $lt
    >>
    {
        ::std::boxed::Box::pin(async move { $($body)* })
    }
)}
