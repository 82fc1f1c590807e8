use component_macros::Component;
use container_common::{Dep, Injectable};

#[derive(Debug, Default, Component)]
#[component]
struct Storage;

#[derive(Debug, Default, Component)]
#[component]
struct Service {
    #[inject]
    storage: Dep<Storage>,
}

fn main() {
    let descriptor = Service::descriptor();
    assert_eq!(descriptor.sites().len(), 1);
    assert!(descriptor.is_instantiable());
}
