pub mod shared {
    pub mod core {
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod key_value_store;
        pub mod notifier;
    }
}

pub mod modules {
    pub mod cart {
        pub mod core {
            pub mod cart;
            pub mod decision;
            pub mod product;
            pub mod stock;
        }
        pub mod use_cases {
            pub mod errors;
            pub mod add_product {
                pub mod command;
                pub mod decide;
                pub mod handler;
            }
            pub mod remove_product {
                pub mod command;
                pub mod decide;
                pub mod handler;
            }
            pub mod update_product_amount {
                pub mod command;
                pub mod decide;
                pub mod handler;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod cart_repository;
                pub mod inventory;
                pub mod inventory_http;
                pub mod inventory_in_memory;
            }
        }
    }
}

pub mod shell;
