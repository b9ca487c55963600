use crate::repo::test::{repos_over, InMemoryStore};

#[tokio::test]
async fn list_preserves_sheet_order_and_skips_blanks() {
    let store = InMemoryStore::with_sheet("MandatoryChannels", vec![
        vec!["cartoons_main".to_owned()],
        vec![String::new()],
        vec!["cartoons_extra".to_owned()],
    ]);
    let channels = repos_over(&store).channels;

    let list = channels.list().await.expect("listing failed");
    assert_eq!(list, vec!["cartoons_main", "cartoons_extra"]);
}

#[tokio::test]
async fn append_adds_to_the_end() {
    let store = InMemoryStore::with_sheet("MandatoryChannels", vec![vec!["cartoons_main".to_owned()]]);
    let channels = repos_over(&store).channels;

    channels.append("cartoons_extra").await.expect("append failed");

    let list = channels.list().await.expect("listing failed");
    assert_eq!(list, vec!["cartoons_main", "cartoons_extra"]);
}
