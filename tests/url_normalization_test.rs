//! Property tests for secret URL construction

use proptest::prelude::*;
use vault_reader_sdk::VaultClient;

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,16}"
}

proptest! {
    #[test]
    fn secret_url_has_single_separators(
        host in "[a-z]{1,12}",
        path in prop::collection::vec(segment(), 1..4),
        key in segment(),
        base_slash in any::<bool>(),
        leading in any::<bool>(),
        trailing in any::<bool>(),
    ) {
        let joined = path.join("/");
        let base_url = format!("http://{}{}", host, if base_slash { "/" } else { "" });
        let secret_path = format!(
            "{}{}{}",
            if leading { "/" } else { "" },
            joined,
            if trailing { "/" } else { "" }
        );

        let client = VaultClient::new(&base_url, &secret_path, "token").unwrap();
        let url = client.url_for(&key);

        prop_assert_eq!(url.clone(), format!("http://{}/v1/{}/{}", host, joined, key));
        prop_assert!(!url["http://".len()..].contains("//"));
    }
}
