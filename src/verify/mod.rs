//! Verification of enumerated constants in tagged templates.
//!
//! For every recognized tagged template without interpolations, each
//! literal chunk is segmented, each segment classified against the tag's
//! registry, and at most one diagnostic reported per segment. List chunks
//! additionally get one separator diagnostic when their spacing is off.

pub mod diagnostic;
pub mod emit;
pub mod matcher;
pub mod spacing;

pub use diagnostic::{Diagnostic, Fix, MessageId, Reporter, Suggestion};
pub use matcher::{classify, Classification};

use crate::config::Options;
use crate::registry::{Registry, RegistrySet};
use crate::segment;
use crate::source::{SourceText, TaggedTemplate};
use crate::tags::{self, TagSpec};
use emit::SegmentSite;

/// Verifies one tagged template against `registry`.
///
/// Templates with interpolations are skipped entirely: their value cannot
/// be known statically.
pub fn verify_template(
    template: &TaggedTemplate,
    spec: TagSpec,
    registry: &Registry,
    options: &Options,
    reporter: &mut dyn Reporter,
) {
    if template.has_interpolation() {
        return;
    }

    for chunk in &template.chunks {
        let segments = segment::split(&chunk.raw, spec.is_list());
        for raw in &segments {
            let site = SegmentSite {
                range: chunk.range.start + raw.start..chunk.range.start + raw.end,
                in_list: spec.is_list(),
            };
            let value = raw.logical();
            let classification = classify(registry, &value);
            if let Some(diagnostic) = emit::diagnose(&classification, &value, &site, options) {
                reporter.report(diagnostic);
            }
        }
        if let Some(diagnostic) = spacing::check(chunk, &segments) {
            reporter.report(diagnostic);
        }
    }
}

/// Verifies every recognized tagged template in `source`.
///
/// Registries are requested from `registries` as tags are encountered, so
/// only the kinds actually used are ever loaded.
pub async fn check_source(
    source: &SourceText,
    registries: &RegistrySet,
    options: &Options,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for template in source.tagged_templates() {
        if template.has_interpolation() {
            continue;
        }
        let Some(spec) = tags::lookup(&template.tag) else {
            continue;
        };
        let registry = registries.get(spec.kind).await;
        verify_template(&template, spec, &registry, options, &mut diagnostics);
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::fix::{apply_edits, apply_fixes};
    use crate::ports::vocabulary::{VocabularyFuture, VocabularySource};
    use crate::tags::EntityKind;

    /// Small fixed vocabularies standing in for the reference data.
    struct Fixture;

    impl VocabularySource for Fixture {
        fn fetch(&self, kind: EntityKind) -> VocabularyFuture<'_> {
            let names: &[&str] = match kind {
                EntityKind::Item => &[
                    "hair spray",
                    "glittery mascara",
                    "Ben-Gal&trade; Balm",
                    "Newbiesport&trade; tent",
                    "bugged bÃ¶n±Ã©t",
                ],
                EntityKind::Effect => &[
                    "And Your Family, Too",
                    "Sugar Rush",
                    "[1701]Hip to the Jive",
                    "[1872]Hip to the Jive",
                    "Plump and Chubby",
                    "[597]A Little Bit Evil",
                    "Video... Games?",
                    "Make Meat FA$T!",
                ],
                EntityKind::Skill => &["Fat Leon's Phat Loot Lyric"],
                EntityKind::Class => &["Vampyre"],
                EntityKind::Location => &["The Middle Chamber"],
                EntityKind::Monster => &["party girl"],
                EntityKind::Familiar => &["Angry Goat"],
                EntityKind::Path => &[],
            };
            let names = names.iter().map(|s| (*s).to_string()).collect();
            Box::pin(async move { Ok(names) })
        }
    }

    fn registries() -> RegistrySet {
        RegistrySet::new(Arc::new(Fixture))
    }

    async fn check(code: &str, options: &Options) -> Vec<Diagnostic> {
        check_source(&SourceText::new(code), &registries(), options).await
    }

    async fn ids(code: &str) -> Vec<MessageId> {
        check(code, &Options::default()).await.into_iter().map(|d| d.message_id).collect()
    }

    fn fixed(code: &str, diagnostics: &[Diagnostic]) -> String {
        apply_fixes(code, diagnostics).text
    }

    #[tokio::test]
    async fn valid_constants_produce_nothing() {
        for code in [
            "$item`hair spray`",
            "$item`Newbiesport™ tent`",
            "$item`bugged bÃ¶n±Ã©t`",
            "$monster`party girl`",
            "$familiar`Angry Goat`",
            "$effect`Video... Games?`",
            "$items`hair spray, Newbiesport™ tent, bugged bÃ¶n±Ã©t`",
            "$effects`And Your Family\\, Too, Sugar Rush`",
            "$items``",
            "$items`${'hair spray'}`",
            "$skill`Fat Leon's Phat Loot Lyric`",
            "$class`Vampyre`",
            "$location`The Middle Chamber`",
            "$effect`[597]A Little Bit Evil`",
            "$effect``",
            "$effect`Make Meat FA$T!`",
            "$item`Gene Tonic: ${phylum}`",
            "$items`Gene Tonic: ${phylum1}, Gene Tonic: ${phylum2}`",
            "$element`hot`",
            "foo.$item`nonsense`",
        ] {
            assert_eq!(ids(code).await, vec![], "{code}");
        }
    }

    #[tokio::test]
    async fn suppression_options_hide_their_reports() {
        let cases = [
            ("$item`Hair Spray`", Options { ignore_capitalization: true, ..Options::default() }),
            ("$item`Newbiesport&trade; tent`", Options { ignore_entities: true, ..Options::default() }),
            ("$item`kfljdafoeiq`", Options { ignore_unrecognized: true, ..Options::default() }),
        ];
        for (code, options) in cases {
            assert!(check(code, &options).await.is_empty(), "{code}");
        }
    }

    #[tokio::test]
    async fn data_override_replaces_vocabulary() {
        let mut set = registries();
        set.override_vocabulary(EntityKind::Item, &["gausie".to_string()]);
        let diagnostics =
            check_source(&SourceText::new("$item`gausie`"), &set, &Options::default()).await;
        assert!(diagnostics.is_empty());
    }

    #[tokio::test]
    async fn wrong_capitalization_is_fixed() {
        let code = "$item`Hair Spray`";
        let diagnostics = check(code, &Options::default()).await;
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message_id, MessageId::ShouldBeCapitalized);
        assert_eq!(&code[diagnostics[0].range.clone()], "Hair Spray");
        assert_eq!(fixed(code, &diagnostics), "$item`hair spray`");
    }

    #[tokio::test]
    async fn entity_encoded_value_is_decoded() {
        let code = "$item`Newbiesport&trade; tent`";
        let diagnostics = check(code, &Options::default()).await;
        assert_eq!(diagnostics[0].message_id, MessageId::DecodeHtmlEntities);
        assert_eq!(
            diagnostics[0].message,
            r#"Enumerated value "Newbiesport&trade; tent" has HTML entities; should be "Newbiesport™ tent"."#
        );
        assert_eq!(fixed(code, &diagnostics), "$item`Newbiesport™ tent`");
    }

    #[tokio::test]
    async fn list_reports_each_segment_in_order() {
        let code = "$items`Hair Spray, Newbiesport&trade; tent, buged bÃ¶n±Ã©t`";
        let diagnostics = check(code, &Options::default()).await;
        let ids: Vec<_> = diagnostics.iter().map(|d| d.message_id).collect();
        assert_eq!(
            ids,
            vec![
                MessageId::ShouldBeCapitalized,
                MessageId::DecodeHtmlEntities,
                MessageId::UnrecognizedValue
            ]
        );
        assert_eq!(
            fixed(code, &diagnostics),
            "$items`hair spray, Newbiesport™ tent, buged bÃ¶n±Ã©t`"
        );
    }

    #[tokio::test]
    async fn unescaped_comma_in_name_is_rewritten_with_escape() {
        let code = "$effects`And Your Family, Too`";
        let diagnostics = check(code, &Options::default()).await;
        let ids: Vec<_> = diagnostics.iter().map(|d| d.message_id).collect();
        assert_eq!(ids, vec![MessageId::ValueShouldBe, MessageId::UnrecognizedValue]);
        assert_eq!(
            diagnostics[0].message,
            r#"Enumerated value "And Your Family" should be "And Your Family, Too"."#
        );
        assert_eq!(fixed(code, &diagnostics), "$effects`And Your Family\\, Too, Too`");
    }

    #[tokio::test]
    async fn wrong_case_across_kinds() {
        for (code, expected) in [
            ("$skill`fat leon's phat loot lyric`", "$skill`Fat Leon's Phat Loot Lyric`"),
            ("$class`vampyre`", "$class`Vampyre`"),
            ("$location`the middle chamber`", "$location`The Middle Chamber`"),
        ] {
            let diagnostics = check(code, &Options::default()).await;
            assert_eq!(diagnostics.len(), 1, "{code}");
            assert_eq!(fixed(code, &diagnostics), expected);
        }
    }

    #[tokio::test]
    async fn bad_separators_get_one_whole_chunk_fix() {
        let code = "$items` hair spray,glittery mascara,\t   Ben-Gal™ Balm   `";
        let diagnostics = check(code, &Options::default()).await;
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message_id, MessageId::InvalidSeparator);
        assert_eq!(fixed(code, &diagnostics), "$items`hair spray, glittery mascara, Ben-Gal™ Balm`");
    }

    #[tokio::test]
    async fn ambiguous_value_offers_bracketed_suggestions() {
        let code = "$effect`Hip to the Jive`";
        let diagnostics = check(code, &Options::default()).await;
        assert_eq!(diagnostics.len(), 1);
        let diagnostic = &diagnostics[0];
        assert_eq!(diagnostic.message_id, MessageId::AmbiguousValueName);
        assert!(diagnostic.fix.is_none());
        let outputs: Vec<String> = diagnostic
            .suggestions
            .iter()
            .map(|s| apply_edits(code, [&s.fix]).text)
            .collect();
        assert_eq!(
            outputs,
            vec!["$effect`[1701]Hip to the Jive`", "$effect`[1872]Hip to the Jive`"]
        );
        assert_eq!(fixed(code, &diagnostics), code);
    }

    #[tokio::test]
    async fn unique_prefix_is_completed() {
        let code = "$effect`plump and chub`";
        let diagnostics = check(code, &Options::default()).await;
        assert_eq!(diagnostics[0].message_id, MessageId::ValueShouldBe);
        assert_eq!(fixed(code, &diagnostics), "$effect`Plump and Chubby`");
    }

    #[tokio::test]
    async fn applying_fixes_once_leaves_nothing_fixable() {
        for code in [
            "$item`Hair Spray`",
            "$item`Newbiesport&trade; tent`",
            "$effect`plump and chub`",
            "$effects`and your family\\, too, sugar rush`",
            "$items`hair spray,glittery mascara`",
        ] {
            let diagnostics = check(code, &Options::default()).await;
            assert!(diagnostics.iter().any(|d| d.fix.is_some()), "{code}");
            let once = fixed(code, &diagnostics);
            let after = check(&once, &Options::default()).await;
            assert!(after.is_empty(), "{code} -> {once}: {after:?}");
        }
    }

    #[tokio::test]
    async fn multiple_templates_in_one_file() {
        let code = "const a = $class`vampyre`;\nconst b = [$item`hair spray`, $monster`Party Girl`];";
        assert_eq!(
            ids(code).await,
            vec![MessageId::ShouldBeCapitalized, MessageId::ShouldBeCapitalized]
        );
    }
}
