//! Cross-schema tests over nested records.

#[cfg(test)]
mod tests {
    use crate::config::CastOptions;
    use crate::errors::BuildError;
    use crate::predicates::{ints, seq, text as texts};
    use crate::schema::{
        atomic, int, optional, record, sequence, text, text_from, AnySchema, FieldMap,
        RecordSchema, Schema, SchemaKind, SequenceSchema,
    };
    use crate::testing::{assert_invalid, assert_valid, assert_violations, init_tracing};
    use crate::{Record, Scrub};
    use pretty_assertions::assert_eq;
    use regex::Regex;
    use serde::Deserialize;
    use serde_json::json;
    use std::fmt;
    use std::sync::Arc;
    use std::thread;
    use uuid::Uuid;

    #[derive(Debug, Clone, Default, PartialEq, Deserialize)]
    struct Greeting(String);

    impl fmt::Display for Greeting {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    #[derive(Debug, Clone, Default, PartialEq, Record, Scrub, Deserialize)]
    struct Contact {
        phone: String,
    }

    #[derive(Debug, Clone, Default, PartialEq, Record, Scrub, Deserialize)]
    struct Item {
        #[serde(rename = "f1")]
        label: String,
    }

    #[derive(Debug, Clone, Default, PartialEq, Record, Scrub, Deserialize)]
    struct Profile {
        #[shapecast(skip_scrub)]
        greeting: Greeting,
        name: String,
        contact: Contact,
        links: Vec<Option<String>>,
        #[shapecast(skip_scrub)]
        #[serde(default)]
        id: Uuid,
        #[serde(rename = "f")]
        items: Vec<Item>,
        score: Option<i64>,
    }

    fn profile_schema() -> RecordSchema<Profile> {
        let contact = record::<Contact>(
            FieldMap::new().with("phone", text().required().test(texts::min_len(1))),
        )
        .unwrap();
        let item = record::<Item>(FieldMap::new().with("label", text().required())).unwrap();

        record::<Profile>(
            FieldMap::new()
                .with(
                    "greeting",
                    text_from::<Greeting>()
                        .tests([texts::regex(Regex::new("a").unwrap()), texts::min_len(1)]),
                )
                .with("name", text().required())
                .with("contact", contact)
                .with(
                    "links",
                    sequence(optional(text().required().test(texts::url()))).test(seq::min_len(2)),
                )
                .with("id", atomic::<Uuid>().default(Uuid::new_v4()))
                .with("items", sequence(item).test(seq::min_len(1)))
                .with("score", optional(int().required()).required()),
        )
        .unwrap()
    }

    fn valid_profile() -> Profile {
        Profile {
            greeting: Greeting("hala".into()),
            name: "b".into(),
            contact: Contact { phone: "555".into() },
            links: vec![
                Some("http://wikipedia.org".into()),
                Some("http://wikipedia.org".into()),
            ],
            id: Uuid::new_v4(),
            items: vec![Item { label: "f1".into() }],
            score: Some(-1),
        }
    }

    #[test]
    fn test_valid_nested_record() {
        init_tracing();
        let schema = profile_schema();
        let mut profile = valid_profile();

        assert_valid(&schema.process(&mut profile));
        let processed = profile.clone();
        assert_valid(&schema.process(&mut profile));
        assert_eq!(profile, processed);
    }

    #[test]
    fn test_empty_items_reported_under_tag() {
        let mut profile = Profile {
            items: Vec::new(),
            ..valid_profile()
        };
        let err = assert_invalid(&profile_schema().process(&mut profile)).to_string();
        assert_eq!(err, r#"{"f":["must contain at least 1 items"]}"#);
    }

    #[test]
    fn test_failures_nest_like_the_data() {
        let mut profile = Profile {
            greeting: Greeting("hello".into()),
            contact: Contact::default(),
            links: vec![Some("nope".into()), None],
            id: Uuid::nil(),
            items: vec![Item::default(), Item { label: "x".into() }],
            score: None,
            ..valid_profile()
        };
        let result = profile_schema().process(&mut profile);

        assert_violations(
            &result,
            &json!({
                "greeting": ["must match regex a"],
                "contact": {"phone": ["required"]},
                "links": {"0": ["invalid URL"]},
                "f": {"0": {"f1": ["required"]}},
                "score": ["required"],
            }),
        );
        assert!(!profile.id.is_nil(), "default should fill the nil id");

        let err = result.unwrap_err();
        assert_eq!(err.at(&["f", "0", "f1"]).map(|e| e.to_string()), Some(r#"["required"]"#.into()));
        assert_eq!(err.violation_count(), 5);
    }

    #[test]
    fn test_name_and_age_scenario() {
        #[derive(Debug, Default, Record)]
        struct Person {
            name: String,
            age: i64,
        }

        let schema = record::<Person>(
            FieldMap::new()
                .with("name", text().required())
                .with("age", int().test(ints::min(0))),
        )
        .unwrap();

        let mut person = Person {
            name: String::new(),
            age: -1,
        };
        assert_violations(
            &schema.process(&mut person),
            &json!({"name": ["required"], "age": ["must be 0 minimum"]}),
        );
    }

    #[test]
    fn test_erased_inner_must_match() {
        let erased = AnySchema::new(int());
        let err = SequenceSchema::<String>::new(Arc::new(text()))
            .with_inner_any(&erased)
            .unwrap_err();
        assert!(matches!(err, BuildError::TypeMismatch { .. }));
        assert!(err.to_string().contains("int_from"));

        let ok = SequenceSchema::<i64>::new(Arc::new(int())).with_inner_any(&erased);
        assert!(ok.is_ok());
    }

    #[test]
    fn test_extend_nested_schema() {
        let strict = profile_schema()
            .extend(FieldMap::new().with("name", text().required().test(texts::min_len(3))))
            .unwrap();

        let mut profile = valid_profile();
        assert_valid(&profile_schema().process(&mut profile));
        assert_violations(
            &strict.process(&mut profile),
            &json!({"name": ["must be at least 3 characters long"]}),
        );
    }

    #[test]
    fn test_cast_json_with_scrub() {
        let schema = profile_schema();
        let src = json!({
            "greeting": "hala",
            "name": "b",
            "contact": {"phone": "555"},
            "links": ["http://a.org", ""],
            "f": [{"f1": "x"}],
            "score": 3,
        })
        .to_string();

        let err = schema
            .cast_json(src.as_bytes(), &CastOptions::new())
            .unwrap_err();
        assert_eq!(
            err.validation().map(ToString::to_string),
            Some(r#"{"links":{"1":["required"]}}"#.to_string())
        );

        let profile = schema
            .cast_json(src.as_bytes(), &CastOptions::new().scrub())
            .unwrap();
        assert_eq!(profile.links, vec![Some("http://a.org".to_string()), None]);
        assert!(!profile.id.is_nil());
    }

    #[test]
    fn test_decode_errors_are_not_validation_errors() {
        let err = profile_schema()
            .cast_json(br#"{"name": 5}"#, &CastOptions::new())
            .unwrap_err();
        assert!(err.is_decode());
        assert!(err.validation().is_none());
    }

    #[test]
    fn test_schema_shared_across_threads() {
        let schema = Arc::new(profile_schema());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let schema = Arc::clone(&schema);
                thread::spawn(move || {
                    let mut profile = valid_profile();
                    if i % 2 == 1 {
                        profile.name.clear();
                    }
                    schema.process(&mut profile).is_ok()
                })
            })
            .collect();

        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![true, false, true, false]);
    }

    #[test]
    fn test_unknown_field_in_nested_extend() {
        let err = profile_schema()
            .extend(FieldMap::new().with("missing", text()))
            .unwrap_err();
        assert_eq!(
            err.to_dict().get("type"),
            Some(&json!("UnknownField"))
        );
    }

    /// Rebuilds `schema` with every atomic and optional schema not required.
    fn relax(schema: &AnySchema) -> Result<AnySchema, BuildError> {
        let mut schema = match schema.inner() {
            Some(inner) => schema.with_inner(&relax(&inner)?)?,
            None => schema.clone(),
        };
        if let Some(fields) = schema.fields() {
            let relaxed = fields
                .iter()
                .map(|(name, field)| relax(field).map(|field| (name, field)))
                .collect::<Result<FieldMap, _>>()?;
            schema = schema.with_fields(relaxed)?;
        }
        match schema.kind() {
            SchemaKind::Atomic | SchemaKind::Optional => schema.with_required(false),
            SchemaKind::Sequence | SchemaKind::Record => Ok(schema),
        }
    }

    #[test]
    fn test_walk_nested_schema_into_partial_variant() {
        let full = AnySchema::new(profile_schema());
        assert_eq!(full.meta().map(<[_]>::len), Some(7));

        let label = |schema: &AnySchema| {
            schema
                .fields()
                .and_then(|f| f.get("items"))
                .and_then(AnySchema::inner)
                .and_then(|item| item.fields().and_then(|f| f.get("label")).cloned())
        };
        assert!(label(&full).unwrap().is_required());

        let partial = relax(&full).unwrap();
        assert!(!label(&partial).unwrap().is_required());
        assert!(!partial.fields().unwrap().get("score").unwrap().is_required());

        let mut sparse = Profile {
            links: vec![Some(String::new()), None],
            items: vec![Item::default()],
            ..Profile::default()
        };
        let original = sparse.clone();

        let patch = partial.downcast::<Profile>("patch").unwrap();
        assert_valid(&patch.process(&mut sparse));
        assert!(sparse.id.is_nil(), "omitted values keep their zero value");

        let strict = full.downcast::<Profile>("full").unwrap();
        let mut again = original;
        assert_violations(
            &strict.process(&mut again),
            &json!({
                "contact": {"phone": ["required"]},
                "f": {"0": {"f1": ["required"]}},
                "greeting": ["must match regex a", "must be at least 1 characters long"],
                "links": {"0": ["required"]},
                "name": ["required"],
                "score": ["required"],
            }),
        );
    }

    #[test]
    fn test_reconfiguring_records_is_unsupported_for_required() {
        let err = AnySchema::new(profile_schema()).with_required(false).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Unsupported { kind: SchemaKind::Record, .. }
        ));
    }
}
