#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::config::TagColors;
    use serde_json::json;

    const NO_TAGS: [&str; 0] = [];

    fn format_to_value(tags: &[&str], message: impl Into<Message>, config: &Config) -> Value {
        let packet = format_payload(tags, &message.into(), config).unwrap();
        serde_json::from_str(&packet).unwrap()
    }

    #[test]
    fn test_string_message_exact_output() {
        let packet = format_payload(&NO_TAGS, &"a string".into(), &Config::default()).unwrap();
        assert_eq!(
            packet,
            r#"{"attachments":[{"title":"a string","fallback":"a string","fields":[]}]}"#
        );
    }

    #[test]
    fn test_string_message_with_tag() {
        let packet = format_to_value(&["test"], "a string", &Config::default());
        assert_eq!(
            packet,
            json!({
                "attachments": [{
                    "title": "a string",
                    "fallback": "a string",
                    "fields": [{ "title": "Tags", "value": "test" }]
                }]
            })
        );
    }

    #[test]
    fn test_title_and_fallback_match_for_any_string() {
        for text in ["", "plain", "with \"quotes\"", "multi\nline", "ünïcödé"] {
            let packet = format_to_value(&["a", "b"], text, &Config::default());
            let attachment = &packet["attachments"][0];
            assert_eq!(attachment["title"], text);
            assert_eq!(attachment["fallback"], text);
        }
    }

    #[test]
    fn test_record_rendered_as_code_block() {
        let packet = format_to_value(&NO_TAGS, json!({ "data": "x" }), &Config::default());
        let attachment = &packet["attachments"][0];

        assert_eq!(attachment["text"], "``` {\n  \"data\": \"x\"\n} ```");
        assert_eq!(attachment["mrkdwn_in"], json!(["text"]));
        assert_eq!(attachment["fields"], json!([]));
        assert!(attachment.get("title").is_none());
        assert!(attachment.get("fallback").is_none());
    }

    #[test]
    fn test_record_message_becomes_title() {
        let message = json!({
            "message": "this is the message that was pulled out of the object below",
            "data": "this is an object and should be formatted"
        });
        let packet = format_to_value(&NO_TAGS, message, &Config::default());
        let attachment = &packet["attachments"][0];

        assert_eq!(
            attachment["title"],
            "this is the message that was pulled out of the object below"
        );
        assert_eq!(attachment["fallback"], attachment["title"]);
        assert_eq!(
            attachment["text"],
            "``` {\n  \"data\": \"this is an object and should be formatted\"\n} ```"
        );
    }

    #[test]
    fn test_record_url_becomes_title_link() {
        let message = json!({
            "message": "title",
            "data": "payload",
            "url": "http://example.com"
        });
        let packet = format_to_value(&NO_TAGS, message, &Config::default());
        let attachment = &packet["attachments"][0];

        assert_eq!(attachment["title_link"], "http://example.com");
        assert_eq!(attachment["text"], "``` {\n  \"data\": \"payload\"\n} ```");
    }

    #[test]
    fn test_record_with_only_message_and_url_renders_empty_object() {
        let message = json!({ "message": "hi", "url": "http://example.com" });
        let packet = format_to_value(&NO_TAGS, message, &Config::default());

        assert_eq!(packet["attachments"][0]["text"], "``` {} ```");
        assert_eq!(packet["attachments"][0]["mrkdwn_in"], json!(["text"]));
    }

    #[test]
    fn test_nested_record_is_pretty_printed() {
        let message = json!({ "outer": { "inner": [1, 2] } });
        let packet = format_to_value(&NO_TAGS, message, &Config::default());

        assert_eq!(
            packet["attachments"][0]["text"],
            "``` {\n  \"outer\": {\n    \"inner\": [\n      1,\n      2\n    ]\n  }\n} ```"
        );
    }

    #[test]
    fn test_convert_object_to_fields_keeps_value_types() {
        let config = Config::new().with_convert_object_to_fields(true);
        let packet = format_to_value(&NO_TAGS, json!({ "name": "test", "age": 25 }), &config);
        let attachment = &packet["attachments"][0];

        assert_eq!(
            attachment["fields"],
            json!([
                { "title": "name", "value": "test" },
                { "title": "age", "value": 25 }
            ])
        );
        assert!(attachment["fields"][1]["value"].is_number());
        assert!(attachment.get("text").is_none());
        assert!(attachment.get("mrkdwn_in").is_none());
    }

    #[test]
    fn test_convert_object_to_fields_preserves_insertion_order() {
        let config = Config::new().with_convert_object_to_fields(true);
        let message = json!({ "zeta": 1, "alpha": 2, "message": "m", "mid": 3 });
        let payload = build_payload(&NO_TAGS, &message.into(), &config);
        let titles: Vec<&str> = payload.attachments[0]
            .fields
            .iter()
            .map(|f| f.title.as_str())
            .collect();

        assert_eq!(titles, vec!["zeta", "alpha", "mid"]);
        assert_eq!(payload.attachments[0].title, Some(json!("m")));
    }

    #[test]
    fn test_null_message_still_moves_to_title() {
        let message = json!({ "message": null, "n": 1.0 });
        let packet = format_payload(&NO_TAGS, &message.into(), &Config::default()).unwrap();

        assert_eq!(
            packet,
            r#"{"attachments":[{"title":null,"fallback":null,"text":"``` {\n  \"n\": 1.0\n} ```","mrkdwn_in":["text"],"fields":[]}]}"#
        );
    }

    #[test]
    fn test_record_is_not_mutated() {
        let message: Message = json!({
            "message": "hello",
            "url": "http://example.com",
            "data": "x"
        })
        .into();
        let before = message.clone();

        format_payload(&["error"], &message, &Config::default()).unwrap();
        format_payload(&NO_TAGS, &message, &Config::new().with_convert_object_to_fields(true))
            .unwrap();

        assert_eq!(message, before);
    }

    #[test]
    fn test_other_shapes_produce_fields_only() {
        for value in [json!(42), json!(true), json!(null), json!([1, "two"])] {
            let packet = format_to_value(&NO_TAGS, value, &Config::default());
            assert_eq!(packet, json!({ "attachments": [{ "fields": [] }] }));
        }
    }

    #[test]
    fn test_message_from_value_classifies_shape() {
        assert_eq!(Message::from(json!("s")), Message::Text("s".to_string()));
        assert!(matches!(Message::from(json!({})), Message::Record(_)));
        assert!(matches!(Message::from(json!(1.5)), Message::Other(_)));
    }

    #[test]
    fn test_additional_fields_appended() {
        let config = Config::new()
            .with_additional_field(Field::new("hi", "there"))
            .with_additional_field(Field::new("go", "away"));
        let packet = format_to_value(&NO_TAGS, "hi there", &config);

        assert_eq!(
            packet["attachments"][0]["fields"],
            json!([
                { "title": "hi", "value": "there" },
                { "title": "go", "value": "away" }
            ])
        );
    }

    #[test]
    fn test_field_order_object_then_additional_then_tags() {
        let config = Config::new()
            .with_convert_object_to_fields(true)
            .with_additional_field(Field::new("env", "prod"));
        let packet = format_to_value(&["deploy", "api"], json!({ "build": 7 }), &config);

        assert_eq!(
            packet["attachments"][0]["fields"],
            json!([
                { "title": "build", "value": 7 },
                { "title": "env", "value": "prod" },
                { "title": "Tags", "value": "deploy, api" }
            ])
        );
    }

    #[test]
    fn test_hide_tags() {
        let config = Config::new().with_hide_tags(true);
        let packet = format_to_value(&["tags", "more tags"], "hi there", &config);

        assert_eq!(packet["attachments"][0]["fields"], json!([]));
    }

    #[test]
    fn test_hide_tags_still_colors() {
        let config = Config::new().with_hide_tags(true);
        let packet = format_to_value(&["error"], "boom", &config);

        assert_eq!(packet["attachments"][0]["color"], "danger");
        assert_eq!(packet["attachments"][0]["fields"], json!([]));
    }

    #[test]
    fn test_single_tag_field() {
        let packet = format_to_value(&["t"], "msg", &Config::new().with_hide_tags(false));
        assert_eq!(
            packet["attachments"][0]["fields"],
            json!([{ "title": "Tags", "value": "t" }])
        );
    }

    #[test]
    fn test_default_tag_colors() {
        let cases = [
            (vec!["success"], Some("good")),
            (vec!["warning"], Some("warning")),
            (vec!["error"], Some("danger")),
            (vec!["error", "warning"], Some("danger")),
            (vec!["warning", "success"], Some("warning")),
            (vec!["success", "error", "warning"], Some("danger")),
            (vec!["info"], None),
        ];

        for (tags, expected) in cases {
            let payload = build_payload(tags.as_slice(), &"some text".into(), &Config::default());
            assert_eq!(
                payload.attachments[0].color.as_deref(),
                expected,
                "tags: {:?}",
                tags
            );
        }
    }

    #[test]
    fn test_custom_tag_colors() {
        let colors: TagColors = [
            ("french", "good"),
            ("english", "warning"),
            ("german", "danger"),
        ]
        .into_iter()
        .collect();
        let config = Config::new().with_tag_colors(colors);

        let packet = format_to_value(&["german"], "a string", &config);
        assert_eq!(packet["attachments"][0]["color"], "danger");
        assert_eq!(
            packet["attachments"][0]["fields"],
            json!([{ "title": "Tags", "value": "german" }])
        );
    }

    #[test]
    fn test_custom_tag_colors_no_default_fallback() {
        let colors: TagColors = [("german", "danger")].into_iter().collect();
        let config = Config::new().with_tag_colors(colors);

        let packet = format_to_value(&["french"], "a string", &config);
        assert!(packet["attachments"][0].get("color").is_none());

        let packet = format_to_value(&["error"], "a string", &config);
        assert!(packet["attachments"][0].get("color").is_none());
    }

    #[test]
    fn test_custom_tag_colors_last_declared_match_wins() {
        let colors: TagColors = [("a", "#111111"), ("b", "#222222")].into_iter().collect();
        let config = Config::new().with_tag_colors(colors);

        // tag order does not matter, map order does
        let payload = build_payload(&["b", "a"], &"x".into(), &config);
        assert_eq!(payload.attachments[0].color.as_deref(), Some("#222222"));
    }

    #[test]
    fn test_payload_options() {
        let config = Config::new()
            .with_channel("MTV")
            .with_username("Jared")
            .with_icon_url("http://image.com")
            .with_icon_emoji(":ghost:");
        let packet = format_payload(&NO_TAGS, &"a message".into(), &config).unwrap();

        assert_eq!(
            packet,
            concat!(
                r#"{"attachments":[{"title":"a message","fallback":"a message","fields":[]}],"#,
                r#""channel":"MTV","icon_url":"http://image.com","icon_emoji":":ghost:","username":"Jared"}"#
            )
        );
    }

    #[test]
    fn test_unset_options_are_omitted() {
        let packet = format_to_value(&NO_TAGS, "a string", &Config::new().with_username("Jared"));
        let object = packet.as_object().unwrap();

        assert_eq!(packet["username"], "Jared");
        assert!(!object.contains_key("channel"));
        assert!(!object.contains_key("icon_url"));
        assert!(!object.contains_key("icon_emoji"));
    }

    #[test]
    fn test_webhook_url_not_in_payload() {
        let config = Config::new().with_webhook_url("http://localhost/hook");
        let packet = format_to_value(&NO_TAGS, "x", &config);
        assert_eq!(packet.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let config = Config::new()
            .with_channel("ops")
            .with_additional_field(Field::new("region", "eu-west-1"));
        let message: Message = json!({ "message": "m", "b": 1, "a": [true, null] }).into();

        let first = format_payload(&["error", "db"], &message, &config).unwrap();
        let second = format_payload(&["error", "db"], &message, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_formatter_shares_config() {
        let formatter = Formatter::new(Config::new().with_channel("alerts"));
        let clone = formatter.clone();

        let a = formatter.format(&["warning"], &"disk at 91%".into()).unwrap();
        let b = clone.format(&["warning"], &"disk at 91%".into()).unwrap();

        assert_eq!(a, b);
        assert_eq!(formatter.config().channel.as_deref(), Some("alerts"));
        assert_eq!(
            formatter.build(&["warning"], &"x".into()).attachments[0].color.as_deref(),
            Some("warning")
        );
    }
}
