use proptest::prelude::*;

use m3u_catalog::generator::M3uGenerator;
use m3u_catalog::models::ChannelEntry;
use m3u_catalog::parser::parse;

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9\"][A-Za-z0-9 ,&.\"-]{0,20}[A-Za-z0-9\"]"
}

fn url_strategy() -> impl Strategy<Value = String> {
    "[a-z]{3,10}".prop_map(|path| format!("http://streams.example/{path}.m3u8"))
}

fn entries_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((name_strategy(), url_strategy()), 0..20)
}

fn build_playlist(entries: &[(String, String)]) -> String {
    let mut text = String::from("#EXTM3U\n");
    for (name, url) in entries {
        text.push_str(&format!("#EXTINF:-1 group-title=\"G\",{name}\n{url}\n"));
    }
    text
}

proptest! {
    #[test]
    fn test_entries_keep_file_order(entries in entries_strategy()) {
        let result = parse(&build_playlist(&entries), "prop");

        prop_assert_eq!(result.entry_count, entries.len());
        let urls: Vec<&str> = result.entries.iter().map(|e| e.url.as_str()).collect();
        let expected: Vec<&str> = entries.iter().map(|(_, url)| url.as_str()).collect();
        prop_assert_eq!(urls, expected);
    }

    #[test]
    fn test_every_entry_has_a_url(text in "(#EXTINF:-1,[a-z]{0,5}\n|[a-z:/.]{0,12}\n|#EXT-X-[A-Z]{1,4}\n|\n){0,30}") {
        let result = parse(&text, "prop");
        prop_assert_eq!(result.entry_count, result.entries.len());
        prop_assert!(result.entries.iter().all(|e| !e.url.is_empty()));
        prop_assert!(result.entries.iter().all(|e| !e.name.is_empty()));
    }

    #[test]
    fn test_orphan_blocks_add_no_entries(
        entries in entries_strategy(),
        orphan_after in prop::collection::vec(any::<bool>(), 20),
    ) {
        let mut text = String::from("#EXTM3U\n");
        for (index, (name, url)) in entries.iter().enumerate() {
            if orphan_after[index] {
                text.push_str("#EXTINF:-1 tvg-id=\"ghost\",Ghost\n");
            }
            text.push_str(&format!("#EXTINF:-1,\"{name}\"\n{url}\n"));
        }
        text.push_str("#EXTINF:-1,Trailing Ghost\n");

        let result = parse(&text, "prop");
        prop_assert_eq!(result.entry_count, entries.len());
        prop_assert!(result.entries.iter().all(|e| e.id.is_none()));
        prop_assert!(result.entries.iter().all(|e| e.name != "Ghost" && e.name != "Trailing Ghost"));
    }

    #[test]
    fn test_minimal_output_round_trips(entries in entries_strategy()) {
        let channels: Vec<ChannelEntry> = entries
            .iter()
            .map(|(name, url)| ChannelEntry {
                name: name.clone(),
                url: url.clone(),
                ..Default::default()
            })
            .collect();

        let reparsed = parse(&M3uGenerator::new().minimal(&channels), "prop");
        prop_assert_eq!(reparsed.entry_count, entries.len());

        for (entry, (name, url)) in reparsed.entries.iter().zip(&entries) {
            prop_assert_eq!(&entry.url, url);
            // Only names mixing quotes and commas may come back with `'` for `"`
            let unquoted = name.replace('"', "'");
            prop_assert!(
                &entry.name == name
                    || (name.contains('"') && name.contains(',') && entry.name == unquoted),
                "name {:?} came back as {:?}",
                name,
                entry.name
            );
        }
    }

    #[test]
    fn test_parsed_names_round_trip(entries in entries_strategy()) {
        let parsed = parse(&build_playlist(&entries), "prop");
        let reparsed = parse(&M3uGenerator::new().minimal(&parsed.entries), "prop");

        let names: Vec<&str> = reparsed.entries.iter().map(|e| e.name.as_str()).collect();
        let expected: Vec<&str> = parsed.entries.iter().map(|e| e.name.as_str()).collect();
        prop_assert_eq!(names, expected);
    }
}
