//! 宏实现的辅助函数

use syn::{GenericArgument, PathArguments, Type};

/// 提取 `Dep<T>` 中的依赖类型 `T`
///
/// 注入字段必须是 `Dep<T>` 形式; 其他类型返回 `None`。
pub fn dep_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Dep" {
        return None;
    }
    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };
    if arguments.args.len() != 1 {
        return None;
    }
    match arguments.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::ToTokens;

    #[test]
    fn extracts_dependency_type() {
        let ty: Type = syn::parse_quote!(Dep<Database>);
        let inner = dep_inner_type(&ty).unwrap();
        assert_eq!(inner.to_token_stream().to_string(), "Database");
    }

    #[test]
    fn extracts_through_qualified_path() {
        let ty: Type = syn::parse_quote!(container_common::Dep<Database>);
        assert!(dep_inner_type(&ty).is_some());
    }

    #[test]
    fn rejects_other_types() {
        let plain: Type = syn::parse_quote!(Database);
        assert!(dep_inner_type(&plain).is_none());

        let arc: Type = syn::parse_quote!(Arc<Database>);
        assert!(dep_inner_type(&arc).is_none());
    }
}
