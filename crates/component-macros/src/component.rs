//! 组件派生宏实现

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, Ident, Lit};

use crate::utils::dep_inner_type;

/// 结构体级 `#[component]` 属性解析结果
#[derive(Default)]
struct ComponentArgs {
    /// 是否带组件标记 (可被自动发现注册)
    tagged: bool,
    /// 自定义组件名称
    name: Option<String>,
    /// 自定义构造函数路径
    constructor: Option<syn::Path>,
}

fn parse_component_args(input: &DeriveInput) -> syn::Result<ComponentArgs> {
    let mut args = ComponentArgs::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("component") {
            continue;
        }
        args.tagged = true;
        if matches!(attr.meta, syn::Meta::Path(_)) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value = meta.value()?;
                let lit: Lit = value.parse()?;
                if let Lit::Str(lit_str) = lit {
                    args.name = Some(lit_str.value());
                    Ok(())
                } else {
                    Err(meta.error("name 的值必须是字符串字面量"))
                }
            } else if meta.path.is_ident("constructor") {
                let value = meta.value()?;
                let lit: Lit = value.parse()?;
                if let Lit::Str(lit_str) = lit {
                    args.constructor = Some(lit_str.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("constructor 的值必须是字符串字面量"))
                }
            } else {
                Err(meta.error("不支持的 component 参数"))
            }
        })?;
    }

    Ok(args)
}

/// 收集带 `#[inject]` 属性的字段与其依赖类型
fn collect_injection_sites(input: &DeriveInput) -> syn::Result<Vec<(Ident, syn::Type)>> {
    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(
            input,
            "#[derive(Component)] 只支持结构体",
        ));
    };

    let mut sites = Vec::new();
    let Fields::Named(fields) = &data.fields else {
        // 单元结构体与元组结构体没有可注入字段
        return Ok(sites);
    };

    for field in &fields.named {
        let injected = field.attrs.iter().any(|attr| attr.path().is_ident("inject"));
        if !injected {
            continue;
        }
        let Some(inner) = dep_inner_type(&field.ty) else {
            return Err(Error::new_spanned(
                &field.ty,
                "#[inject] 字段的类型必须是 Dep<T>",
            ));
        };
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new_spanned(field, "#[inject] 字段必须是命名字段"))?;
        sites.push((ident, inner.clone()));
    }

    Ok(sites)
}

/// 实现 `#[derive(Component)]` 宏
pub fn derive_component_impl(input: DeriveInput) -> TokenStream {
    let args = match parse_component_args(&input) {
        Ok(args) => args,
        Err(e) => return e.to_compile_error().into(),
    };
    let sites = match collect_injection_sites(&input) {
        Ok(sites) => sites,
        Err(e) => return e.to_compile_error().into(),
    };

    let struct_name = &input.ident;
    let struct_name_string = struct_name.to_string();
    let component_name = args.name.as_deref().unwrap_or(&struct_name_string);
    let tagged = args.tagged;

    // 生成 Component trait 实现
    let component_impl = quote! {
        impl container_common::Component for #struct_name {
            fn name(&self) -> &'static str {
                #component_name
            }
        }
    };

    // 描述符基础: 自定义构造函数或 Default
    let base_descriptor = match &args.constructor {
        Some(path) => quote! {
            container_common::ComponentDescriptor::with_constructor::<Self, _>(#path)
        },
        None => quote! {
            container_common::ComponentDescriptor::of::<Self>()
        },
    };

    let site_calls = sites.iter().map(|(field, dep_ty)| {
        quote! {
            .with_site(container_common::InjectionSite::new::<Self, #dep_ty>(
                stringify!(#field),
                <#dep_ty as container_common::Injectable>::descriptor,
                |owner, dep| {
                    let _ = owner.#field.fill(dep);
                },
            ))
        }
    });

    let injectable_impl = quote! {
        impl container_common::Injectable for #struct_name {
            fn descriptor() -> container_common::ComponentDescriptor {
                #base_descriptor
                #(#site_calls)*
            }
        }
    };

    let enrollment_code = generate_enrollment_code(struct_name, tagged);

    let expanded = quote! {
        #component_impl

        #injectable_impl

        #enrollment_code
    };

    TokenStream::from(expanded)
}

/// 生成类型构件自动登记代码
fn generate_enrollment_code(struct_name: &Ident, tagged: bool) -> proc_macro2::TokenStream {
    let enrollment_fn_name = Ident::new(
        &format!(
            "__enroll_type_{}",
            struct_name.to_string().to_lowercase()
        ),
        Span::call_site(),
    );

    quote! {
        // 使用 ctor 在程序启动时登记类型构件
        #[ctor::ctor]
        fn #enrollment_fn_name() {
            type_source::global_type_index().enroll(type_source::TypeDescriptor::new::<
                #struct_name,
            >(
                concat!(module_path!(), "::", stringify!(#struct_name)),
                #tagged,
                <#struct_name as container_common::Injectable>::descriptor,
            ));
        }
    }
}
