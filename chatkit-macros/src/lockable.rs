use crate::field_utils::ensure_required_fields;
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{
    Item, Path, Result, Token, Type, parse::Parse, parse::ParseStream,
    parse_macro_input,
};

/// #[lockable] 宏实现
/// - 若缺失则追加字段：`locking: bool`, `execution_guard: Option<ExecutionGuard>`
/// - 已存在的同名字段保留用户定义（类型需兼容）
/// - 实现 `Lockable` 的四个必需方法，`ensure_guard/active_guard` 沿用 trait 默认实现
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as LockableAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[lockable] only on struct")
                .to_compile_error()
                .into();
        }
    };

    // 仅支持具名字段结构体
    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let krate = cfg
        .krate
        .unwrap_or_else(|| syn::parse_quote! { ::chatkit_domain });

    let bool_ty: Type = syn::parse_quote! { bool };
    let guard_ty: Type =
        syn::parse_quote! { ::core::option::Option<#krate::lockable::ExecutionGuard> };
    ensure_required_fields(
        fields_named,
        &[("locking", &bool_ty), ("execution_guard", &guard_ty)],
    );

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let expanded = quote! {
        #st

        impl #impl_generics #krate::lockable::Lockable for #ident #ty_generics #where_clause {
            fn locking(&self) -> bool { self.locking }

            fn set_locking(&mut self, locking: bool) { self.locking = locking; }

            fn execution_guard(&self) -> ::core::option::Option<&#krate::lockable::ExecutionGuard> {
                self.execution_guard.as_ref()
            }

            fn execution_guard_mut(
                &mut self,
            ) -> &mut ::core::option::Option<#krate::lockable::ExecutionGuard> {
                &mut self.execution_guard
            }
        }
    };

    TokenStream::from(expanded)
}

// -------- parsing --------

struct LockableAttrConfig {
    krate: Option<Path>,
}

impl Parse for LockableAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.is_empty() {
            return Ok(Self { krate: None });
        }

        let key: Token![crate] = input.parse()?;
        let _eq: Token![=] = input
            .parse()
            .map_err(|_| syn::Error::new(key.span(), "expected `crate = path` in attribute"))?;
        let path: Path = input.parse()?;

        if !input.is_empty() {
            return Err(syn::Error::new(
                input.span(),
                "unexpected tokens in attribute; only `crate = path` is supported",
            ));
        }

        Ok(Self { krate: Some(path) })
    }
}
