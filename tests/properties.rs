use proptest::prelude::*;
use textbook::{Textbook, UserDirectory};

fn is_sorted(names: &[String]) -> bool {
    names.windows(2).all(|w| w[0].as_bytes() <= w[1].as_bytes())
}

proptest! {
    /// Property: the directory is sorted after every single insertion
    #[test]
    fn prop_directory_sorted_after_each_insert(names in prop::collection::vec("[a-zA-Z0-9_]{1,12}", 0..40)) {
        let mut dir = UserDirectory::new();
        for (i, name) in names.iter().enumerate() {
            dir.insert(name, "password1");
            prop_assert!(is_sorted(&dir.usernames()));
            prop_assert_eq!(dir.len(), i + 1);
        }
    }

    /// Property: register then find yields the registered password
    #[test]
    fn prop_register_then_find(names in prop::collection::hash_set("[a-z]{1,10}", 1..30), password in "[a-z0-9]{8,15}") {
        let mut textbook = Textbook::new();
        for name in &names {
            textbook.register(name, &password).unwrap();
        }
        for name in &names {
            let user = textbook.directory().find_user(name).unwrap();
            prop_assert_eq!(&user.password, &password);
        }
    }

    /// Property: friend lists stay sorted whatever order friends are added in
    #[test]
    fn prop_friends_sorted(names in prop::collection::hash_set("[a-z]{1,8}", 1..20)) {
        let mut textbook = Textbook::new();
        textbook.register("owner_", "password1").unwrap();
        for name in &names {
            textbook.register(name, "password1").unwrap();
        }
        textbook.authenticate("owner_", "password1").unwrap();
        for name in &names {
            textbook.add_friend(name).unwrap();
        }
        let friends = textbook.list_friends().unwrap();
        prop_assert_eq!(friends.len(), names.len());
        prop_assert!(is_sorted(&friends));
    }

    /// Property: posts always list newest first
    #[test]
    fn prop_posts_newest_first(posts in prop::collection::vec("[a-z ]{0,20}[a-z]", 1..25)) {
        let mut textbook = Textbook::new();
        textbook.register("poster", "password1").unwrap();
        textbook.authenticate("poster", "password1").unwrap();
        for post in &posts {
            textbook.add_post(post).unwrap();
        }
        let mut expected = posts.clone();
        expected.reverse();
        prop_assert_eq!(textbook.list_own_posts().unwrap(), expected);
    }
}
