use super::types::{ArticleRecord, Enclosure, FeedInfo, FeedResult};
use feed_rs::parser;

/// Parses raw RSS/Atom bytes into the same shape the rss2json converter returns.
///
/// Used by the direct backend so the renderers never need to know which
/// backend produced a feed.
pub fn parse_feed(bytes: &[u8]) -> Result<FeedResult, parser::ParseFeedError> {
    let feed = parser::parse(bytes)?;

    let info = FeedInfo {
        title: feed.title.map(|t| t.content),
        link: feed.links.first().map(|l| l.href.clone()),
    };

    let items = feed
        .entries
        .into_iter()
        .map(|entry| {
            let link = entry.links.first().map(|l| l.href.clone());
            let author = entry
                .authors
                .first()
                .map(|p| p.name.trim().to_string())
                .filter(|n| !n.is_empty());
            let pub_date = entry.published.or(entry.updated).map(|dt| dt.to_rfc3339());
            let description = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body));

            let enclosure = entry.media.iter().find_map(|media| {
                media
                    .content
                    .iter()
                    .find_map(|c| {
                        c.url.as_ref().map(|u| Enclosure {
                            link: Some(u.to_string()),
                            mime_type: c.content_type.as_ref().map(|m| m.to_string()),
                        })
                    })
            });
            let thumbnail = entry
                .media
                .iter()
                .flat_map(|m| m.thumbnails.iter())
                .map(|t| t.image.uri.clone())
                .next();

            ArticleRecord {
                title: entry.title.map(|t| t.content),
                author,
                link,
                pub_date,
                description,
                enclosure,
                thumbnail,
            }
        })
        .collect();

    Ok(FeedResult { feed: info, items })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
    <title>Quarterly Review</title>
    <link>https://review.example</link>
    <item>
        <guid>a1</guid>
        <title>First</title>
        <link>https://review.example/first</link>
        <author>ed@review.example (Editor)</author>
        <pubDate>Tue, 05 Mar 2024 10:00:00 GMT</pubDate>
        <description>&lt;p&gt;Intro&lt;/p&gt;</description>
        <enclosure url="https://review.example/first.jpg" type="image/jpeg" length="100"/>
    </item>
    <item>
        <guid>a2</guid>
        <title>Second</title>
    </item>
</channel></rss>"#;

    #[test]
    fn test_parse_rss_into_feed_result() {
        let feed = parse_feed(RSS.as_bytes()).unwrap();
        assert_eq!(feed.feed.title.as_deref(), Some("Quarterly Review"));
        assert_eq!(feed.items.len(), 2);

        let first = &feed.items[0];
        assert_eq!(first.title.as_deref(), Some("First"));
        assert_eq!(first.link.as_deref(), Some("https://review.example/first"));
        assert_eq!(first.image_url(), Some("https://review.example/first.jpg"));
        assert!(first.pub_date.as_deref().unwrap().starts_with("2024-03-05T10:00:00"));
        assert!(first.description.as_deref().unwrap().contains("Intro"));

        let second = &feed.items[1];
        assert_eq!(second.image_url(), None);
        assert_eq!(second.pub_date, None);
    }

    #[test]
    fn test_parse_atom() {
        let atom = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Mag</title>
  <id>urn:uuid:1</id>
  <updated>2024-03-05T00:00:00Z</updated>
  <entry>
    <title>Entry</title>
    <id>urn:uuid:2</id>
    <link href="https://atom.example/entry"/>
    <updated>2024-03-05T00:00:00Z</updated>
    <author><name>Grace</name></author>
    <summary>Short</summary>
  </entry>
</feed>"#;
        let feed = parse_feed(atom.as_bytes()).unwrap();
        assert_eq!(feed.feed.title.as_deref(), Some("Atom Mag"));
        let entry = &feed.items[0];
        assert_eq!(entry.author.as_deref(), Some("Grace"));
        assert!(entry.description.as_deref().unwrap().contains("Short"));
        assert_eq!(
            crate::util::machine_readable_date(entry.pub_date.as_deref().unwrap()).as_deref(),
            Some("2024-03-05")
        );
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(parse_feed(b"<not valid xml").is_err());
    }
}
