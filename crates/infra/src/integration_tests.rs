//! Integration tests for the product list access object.
//!
//! Tests: Service → RecordStore / ItemSearch / Session / Exporter (in-memory)
//!
//! Verifies:
//! - Lookups only ever see the acting user's active lists
//! - Mutations are gated by session and ownership
//! - Listing merges configured templates and filters special lists

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::anyhow;

    use wishlist_auth::{Session, StaticSession};
    use wishlist_core::{RecordId, UserId};
    use wishlist_lists::query::PRODUCT_LIST_RECORD;
    use wishlist_lists::{
        Field, ItemDescriptor, ListTemplate, ProductListConfig, ProductListData, ProductListEntry,
        ProductListItem,
    };

    use crate::export::{Email, ExportSettings, Exporter, InMemoryFileCabinet, Mailer, OutboxMailer};
    use crate::item_search::InMemoryItemSearch;
    use crate::product_lists::{ProductListError, ProductListService};
    use crate::record_store::{InMemoryRecordStore, RecordStore, StoreError};

    type Service = ProductListService<Arc<InMemoryRecordStore>, Arc<InMemoryItemSearch>>;

    const ALICE: UserId = UserId::new(7);
    const BOB: UserId = UserId::new(8);

    struct Fixture {
        store: Arc<InMemoryRecordStore>,
        items: Arc<InMemoryItemSearch>,
        session: Arc<StaticSession>,
    }

    fn setup(config: ProductListConfig) -> (Service, Fixture) {
        let store = Arc::new(InMemoryRecordStore::new());
        store.set_label(Field::Type, "1", "default");
        store.set_label(Field::Type, "2", "later");
        store.set_label(Field::Type, "3", "predefined");
        store.set_label(Field::Type, "4", "quote");
        store.set_label(Field::Scope, "2", "private");
        store.set_label(Field::Owner, "7", "Alice");

        let items = Arc::new(InMemoryItemSearch::new());
        let session = Arc::new(StaticSession::logged_in());
        let service = ProductListService::new(
            store.clone(),
            items.clone(),
            session.clone() as Arc<dyn Session>,
            config,
        );
        (
            service,
            Fixture {
                store,
                items,
                session,
            },
        )
    }

    fn config() -> ProductListConfig {
        ProductListConfig {
            login_required: true,
            addition_enabled: true,
            list_templates: vec![],
        }
    }

    fn template(template_id: Option<&str>, name: Option<&str>, type_id: Option<&str>) -> ListTemplate {
        ListTemplate {
            template_id: template_id.map(str::to_string),
            name: name.map(str::to_string),
            type_id: type_id.map(str::to_string),
            ..ListTemplate::default()
        }
    }

    fn seed(fx: &Fixture, owner: UserId, name: &str, type_id: &str) -> RecordId {
        let owner = owner.to_string();
        fx.store
            .insert(
                PRODUCT_LIST_RECORD,
                [
                    (Field::Name, name),
                    (Field::Owner, owner.as_str()),
                    (Field::Type, type_id),
                    (Field::Scope, "2"),
                ],
            )
            .unwrap()
    }

    fn line(item_id: &str, sku: &str, name: &str, quantity: u32) -> ProductListItem {
        ProductListItem {
            internal_id: format!("line-{item_id}"),
            item: ItemDescriptor {
                internal_id: item_id.to_string(),
                display_name: name.to_string(),
                sku: Some(sku.to_string()),
                store_details: None,
            },
            quantity,
        }
    }

    fn names(lists: &[ProductListEntry]) -> Vec<&str> {
        lists.iter().map(|l| l.name()).collect()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lookups
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn get_returns_owned_list_with_items_sorted_by_sku() {
        let (service, fx) = setup(config());
        let id = seed(&fx, ALICE, "Gifts", "1");
        fx.items.add(ALICE, id.clone(), line("11", "SKU-B", "Boots", 1));
        fx.items.add(ALICE, id.clone(), line("10", "SKU-A", "Anorak", 3));
        fx.items
            .set_store_details("10", serde_json::json!({"onlinecustomerprice": "49.00"}));

        let list = service.get(ALICE, &id).unwrap();
        assert_eq!(list.internal_id, id);
        assert_eq!(list.name, "Gifts");
        assert_eq!(list.owner.name.as_deref(), Some("Alice"));
        assert_eq!(list.type_name.as_deref(), Some("default"));
        assert_eq!(list.scope_name.as_deref(), Some("private"));
        assert!(!list.last_modified_date.is_empty());

        let skus: Vec<_> = list.items.iter().map(|i| i.item.sku.as_deref().unwrap()).collect();
        assert_eq!(skus, ["SKU-A", "SKU-B"]);
        assert!(list.items[0].item.store_details.is_some());
    }

    #[test]
    fn get_never_returns_foreign_or_inactive_lists() {
        let (service, fx) = setup(config());
        let bobs = seed(&fx, BOB, "Bob's", "1");
        let alices = seed(&fx, ALICE, "Old", "1");
        service.delete(ALICE, &alices).unwrap();

        assert_eq!(service.get(ALICE, &bobs), Err(ProductListError::NotFound));
        assert_eq!(service.get(ALICE, &alices), Err(ProductListError::NotFound));
        assert_eq!(
            service.get(ALICE, &RecordId::from(999u64)),
            Err(ProductListError::NotFound)
        );
    }

    #[test]
    fn lookups_require_a_session_when_login_is_required() {
        let (service, fx) = setup(config());
        let id = seed(&fx, ALICE, "Gifts", "1");
        fx.session.set_logged_in(false);

        assert_eq!(service.get(ALICE, &id), Err(ProductListError::Unauthorized));
        assert_eq!(
            service.get_saved_for_later(ALICE),
            Err(ProductListError::Unauthorized)
        );
        assert_eq!(
            service.create(ALICE, &ProductListData::default()),
            Err(ProductListError::Unauthorized)
        );
    }

    #[test]
    fn anonymous_access_allowed_when_login_not_required() {
        let (service, fx) = setup(ProductListConfig {
            login_required: false,
            ..config()
        });
        let id = seed(&fx, ALICE, "Gifts", "1");
        fx.session.set_logged_in(false);

        assert_eq!(service.get(ALICE, &id).unwrap().name, "Gifts");
    }

    #[test]
    fn special_type_prefers_stored_list() {
        let mut cfg = config();
        cfg.list_templates = vec![template(Some("later"), Some("Saved for Later"), Some("2"))];
        let (service, fx) = setup(cfg);
        let id = seed(&fx, ALICE, "My saved items", "2");

        match service.get_saved_for_later(ALICE).unwrap() {
            ProductListEntry::Stored(list) => {
                assert_eq!(list.internal_id, id);
                assert_eq!(list.name, "My saved items");
            }
            other => panic!("expected stored list, got {other:?}"),
        }
    }

    #[test]
    fn special_type_falls_back_to_template_reusing_type_id_as_scope() {
        let mut cfg = config();
        cfg.list_templates = vec![
            template(Some("general"), Some("Wishlist"), None),
            template(Some("quote"), Some("Request a Quote"), Some("4")),
            template(Some("quote-2"), Some("Second quote"), Some("4")),
        ];
        let (service, fx) = setup(cfg);
        seed(&fx, BOB, "Bob's quote", "4");

        let entry = service.get_request_a_quote(ALICE).unwrap();
        assert!(!entry.is_stored());
        assert_eq!(entry.name(), "Request a Quote");
        assert_eq!(entry.scope_id(), Some("4"));
        assert_eq!(entry.scope_name(), Some("private"));
        assert_eq!(entry.description(), "");
    }

    #[test]
    fn special_type_without_record_or_template_is_not_found() {
        let (service, _fx) = setup(config());
        assert_eq!(
            service.get_saved_for_later(ALICE),
            Err(ProductListError::NotFound)
        );
    }

    // ─────────────────────────────────────────────────────────────────────
    // Listing
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn search_excludes_saved_for_later_and_quote_lists() {
        let (service, fx) = setup(config());
        seed(&fx, ALICE, "Gifts", "1");
        seed(&fx, ALICE, "Later", "2");
        seed(&fx, ALICE, "Quote", "4");
        seed(&fx, BOB, "Bob's", "1");

        let lists = service.search(ALICE, None, false).unwrap();
        assert_eq!(names(&lists), ["Gifts"]);
    }

    #[test]
    fn search_synthesizes_valid_templates_and_skips_malformed_ones() {
        let mut cfg = config();
        cfg.list_templates = vec![
            template(Some("wish"), Some("Wishlist"), None),
            template(None, Some("Nameless id"), None),
        ];
        let (service, _fx) = setup(cfg);

        let lists = service.search(ALICE, None, false).unwrap();
        assert_eq!(lists.len(), 1);
        let entry = &lists[0];
        assert!(!entry.is_stored());
        assert_eq!(entry.template_id(), Some("wish"));
        assert_eq!(entry.scope_id(), Some("2"));
        assert_eq!(entry.scope_name(), Some("private"));
        assert_eq!(entry.type_id(), Some("3"));
        assert_eq!(entry.type_name(), Some("predefined"));
        assert_eq!(entry.description(), "");
        assert!(entry.items().is_empty());
    }

    #[test]
    fn search_does_not_duplicate_templates_already_stored() {
        let mut cfg = config();
        cfg.list_templates = vec![
            template(Some("wish"), Some("Wishlist"), None),
            template(Some("later"), Some("Saved for Later"), Some("2")),
        ];
        let (service, fx) = setup(cfg);
        fx.store
            .insert(
                PRODUCT_LIST_RECORD,
                [
                    (Field::Name, "Wishlist"),
                    (Field::Owner, "7"),
                    (Field::Type, "3"),
                    (Field::TemplateId, "wish"),
                ],
            )
            .unwrap();

        let lists = service.search(ALICE, None, false).unwrap();
        assert_eq!(lists.len(), 1);
        assert!(lists[0].is_stored());
        assert_eq!(lists[0].template_id(), Some("wish"));
    }

    #[test]
    fn single_list_mode_returns_only_predefined_lists() {
        let cfg = ProductListConfig {
            login_required: true,
            addition_enabled: false,
            list_templates: vec![
                template(Some("wish"), Some("Wishlist"), None),
                template(Some("later"), Some("Saved for Later"), Some("2")),
            ],
        };
        let (service, fx) = setup(cfg);
        seed(&fx, ALICE, "Custom", "1");
        seed(&fx, ALICE, "Later", "2");

        let lists = service.search(ALICE, None, false).unwrap();
        assert_eq!(names(&lists), ["Wishlist"]);
        assert_eq!(lists[0].type_name(), Some("predefined"));
    }

    #[test]
    fn numeric_template_ids_from_json_match_stored_lists() {
        let cfg = ProductListConfig::from_json_str(
            r#"{
                "loginRequired": true,
                "additionEnabled": false,
                "listTemplates": [
                    {"templateId": 1, "name": "Wish", "typeId": 3},
                    {"templateId": 2, "name": "Later", "typeId": 2}
                ]
            }"#,
        )
        .unwrap();
        let (service, fx) = setup(cfg);
        fx.store
            .insert(
                PRODUCT_LIST_RECORD,
                [
                    (Field::Name, "Wish stored"),
                    (Field::Owner, "7"),
                    (Field::Type, "3"),
                    (Field::TemplateId, "1"),
                ],
            )
            .unwrap();

        let lists = service.search(ALICE, None, false).unwrap();
        assert_eq!(names(&lists), ["Wish stored"]);
        assert!(lists[0].is_stored());
    }

    #[test]
    fn search_honours_sort_token() {
        let (service, fx) = setup(config());
        seed(&fx, ALICE, "b", "1");
        seed(&fx, ALICE, "c", "1");
        seed(&fx, ALICE, "a", "1");

        let asc = service.search(ALICE, None, false).unwrap();
        assert_eq!(names(&asc), ["a", "b", "c"]);

        let desc = service.search(ALICE, Some("name:DESC"), false).unwrap();
        assert_eq!(names(&desc), ["c", "b", "a"]);
    }

    #[test]
    fn search_helper_collects_template_ids() {
        let (service, fx) = setup(config());
        fx.store
            .insert(
                PRODUCT_LIST_RECORD,
                [(Field::Name, "x"), (Field::Owner, "7"), (Field::TemplateId, "t1")],
            )
            .unwrap();
        seed(&fx, ALICE, "y", "1");

        let mut ids = Vec::new();
        let lists = service
            .search_helper(
                &wishlist_lists::query::owned_active(ALICE),
                wishlist_lists::query::columns(),
                false,
                None,
                Some(&mut ids),
            )
            .unwrap();
        assert_eq!(lists.len(), 2);
        assert_eq!(ids, ["t1"]);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn create_sanitizes_name_and_leaves_missing_description_unset() {
        let (service, fx) = setup(config());
        let data = ProductListData {
            name: Some("<x>".into()),
            description: None,
            ..ProductListData::default()
        };

        let id = service.create(ALICE, &data).unwrap();
        let record = fx.store.get(&id).unwrap();
        assert_eq!(record.get_field_value(Field::Name), Some("&lt;x&gt;"));
        assert_eq!(record.get_field_value(Field::Description), None);
        assert_eq!(record.get_field_value(Field::Owner), Some("7"));
        assert_eq!(record.get_field_value(Field::Type), None);
    }

    #[test]
    fn description_round_trip_keeps_escaped_brackets() {
        let (service, _fx) = setup(config());
        let data = ProductListData {
            name: Some("Gifts".into()),
            description: Some("first<br>second <i>".into()),
            type_id: Some("1".into()),
            ..ProductListData::default()
        };
        let id = service.create(ALICE, &data).unwrap();

        let list = service.get(ALICE, &id).unwrap();
        assert_eq!(list.description, "first<br>second &lt;i&gt;");
    }

    #[test]
    fn update_overwrites_given_fields_and_always_replaces_description() {
        let (service, fx) = setup(config());
        let id = service
            .create(
                ALICE,
                &ProductListData {
                    name: Some("Gifts".into()),
                    description: Some("for mum".into()),
                    type_id: Some("1".into()),
                    scope_id: Some("2".into()),
                    ..ProductListData::default()
                },
            )
            .unwrap();

        service
            .update(
                ALICE,
                &id,
                &ProductListData {
                    name: Some("Gifts <2024>".into()),
                    type_id: Some(String::new()),
                    ..ProductListData::default()
                },
            )
            .unwrap();

        let record = fx.store.get(&id).unwrap();
        assert_eq!(record.get_field_value(Field::Name), Some("Gifts &lt;2024&gt;"));
        assert_eq!(record.get_field_value(Field::Type), Some("1"));
        assert_eq!(record.get_field_value(Field::Scope), Some("2"));
        assert_eq!(record.get_field_value(Field::Description), Some(""));
    }

    #[test]
    fn mutations_of_foreign_lists_are_unauthorized() {
        let (service, fx) = setup(config());
        let bobs = seed(&fx, BOB, "Bob's", "1");
        let data = ProductListData {
            name: Some("mine now".into()),
            ..ProductListData::default()
        };

        assert_eq!(
            service.update(ALICE, &bobs, &data),
            Err(ProductListError::Unauthorized)
        );
        assert_eq!(service.delete(ALICE, &bobs), Err(ProductListError::Unauthorized));

        let record = fx.store.get(&bobs).unwrap();
        assert_eq!(record.get_field_value(Field::Name), Some("Bob's"));
        assert_eq!(record.get_field_value(Field::IsInactive), None);
    }

    #[test]
    fn delete_deactivates_and_keeps_the_row() {
        let (service, fx) = setup(config());
        let id = seed(&fx, ALICE, "Gifts", "1");

        assert_eq!(service.delete(ALICE, &id).unwrap(), id);
        assert_eq!(fx.store.len(), 1);
        assert_eq!(
            fx.store.get(&id).unwrap().get_field_value(Field::IsInactive),
            Some("T")
        );
        assert!(service.search(ALICE, None, false).unwrap().is_empty());
    }

    #[test]
    fn store_failures_propagate_unchanged() {
        let (service, fx) = setup(config());
        let missing = RecordId::from(42u64);
        let err = service.update(ALICE, &missing, &ProductListData::default()).unwrap_err();
        assert_eq!(
            err,
            ProductListError::Store(StoreError::RecordNotFound {
                record_type: PRODUCT_LIST_RECORD.to_string(),
                id: missing.clone(),
            })
        );
        assert!(fx.store.load(PRODUCT_LIST_RECORD, &missing).is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 200,
                ..ProptestConfig::default()
            })]

            /// Property: mutating someone else's list fails regardless of payload.
            #[test]
            fn foreign_mutations_always_unauthorized(
                owner in 1u64..1000,
                actor in 1u64..1000,
                name in proptest::option::of(".{0,20}"),
                description in proptest::option::of(".{0,40}"),
                type_id in proptest::option::of("[1-4]"),
            ) {
                prop_assume!(owner != actor);
                let (service, fx) = setup(config());
                let id = seed(&fx, UserId::new(owner), "theirs", "1");
                let data = ProductListData {
                    name,
                    description,
                    type_id,
                    ..ProductListData::default()
                };

                prop_assert_eq!(
                    service.update(UserId::new(actor), &id, &data),
                    Err(ProductListError::Unauthorized)
                );
                prop_assert_eq!(
                    service.delete(UserId::new(actor), &id),
                    Err(ProductListError::Unauthorized)
                );
                let stored = fx.store.get(&id).unwrap();
                prop_assert_eq!(stored.get_field_value(Field::Name), Some("theirs"));
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn export_flag_files_and_mails_the_listing() {
        wishlist_observability::init();

        let files = Arc::new(InMemoryFileCabinet::new());
        let mailer = Arc::new(OutboxMailer::new());
        let (service, fx) = setup(config());
        let service = service.with_exporter(Exporter::new(
            files.clone(),
            mailer.clone(),
            ExportSettings::new("sales@example.com"),
        ));
        let id = seed(&fx, ALICE, "Gifts", "1");
        fx.items.add(ALICE, id, line("10", "SKU-A", "Mug", 2));
        seed(&fx, ALICE, "Later", "2");

        let lists = service.search(ALICE, None, true).unwrap();
        assert_eq!(names(&lists), ["Gifts"]);

        let saved = files.files();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].file_type, "EXCEL");
        assert!(saved[0].contents.contains("Gifts"));
        assert!(saved[0].contents.contains("Mug"));
        assert!(!saved[0].contents.contains("Later"));

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, "sales@example.com");
        assert_eq!(sent[0].subject, "whislist export");
        assert_eq!(sent[0].body, "Gifts\nMug");
        assert_eq!(sent[0].attachment.as_deref(), Some("1"));
    }

    struct FailingMailer;

    impl Mailer for FailingMailer {
        fn send(&self, _email: Email) -> anyhow::Result<()> {
            Err(anyhow!("smtp unavailable"))
        }
    }

    #[test]
    fn export_failures_do_not_fail_the_listing() {
        let (service, fx) = setup(config());
        let service = service.with_exporter(Exporter::new(
            Arc::new(InMemoryFileCabinet::new()),
            Arc::new(FailingMailer),
            ExportSettings::new("sales@example.com"),
        ));
        seed(&fx, ALICE, "Gifts", "1");

        assert_eq!(names(&service.search(ALICE, None, true).unwrap()), ["Gifts"]);
    }

    #[test]
    fn export_without_exporter_only_returns_lists() {
        let (service, fx) = setup(config());
        seed(&fx, ALICE, "Gifts", "1");
        assert_eq!(names(&service.search(ALICE, None, true).unwrap()), ["Gifts"]);
    }
}
