use anyhow::{anyhow, Result};

pub fn is_shelley_address(address: &str) -> bool {
    address.starts_with("addr1") || address.starts_with("addr_test1")
}

pub fn remove_trailing_slash(url: &str) -> String {
    url.strip_suffix('/').unwrap_or(url).to_string()
}

/// Check that `address` is a checksummed bech32 Shelley payment address.
///
/// Returns the network id taken from the low nibble of the header byte
/// (1 = mainnet, 0 = testnets).
pub fn validate_address(address: &str) -> Result<u8> {
    if !is_shelley_address(address) {
        return Err(anyhow!("{} is not a Shelley payment address", address));
    }
    let (hrp, payload) =
        bech32::decode(address).map_err(|e| anyhow!("invalid bech32 address {}: {}", address, e))?;
    if hrp.as_str() != "addr" && hrp.as_str() != "addr_test" {
        return Err(anyhow!("unexpected address prefix {}", hrp));
    }
    let header = payload
        .first()
        .ok_or_else(|| anyhow!("empty address payload in {}", address))?;
    Ok(header & 0x0f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_address_known_script_addresses() {
        assert_eq!(
            validate_address("addr1w84q0y2wwfj5efd9ch3x492edeh6pdwycvt7g030jfzhagg5ftr54").unwrap(),
            1
        );
        assert_eq!(
            validate_address("addr1wxxxdudv3dtaa09tngrm8wds54v45kkhdcau4e6keqh0uncksc7pn").unwrap(),
            1
        );
    }

    #[test]
    fn test_validate_address_bad_checksum() {
        let flipped = "addr1w84q0y2wwfj5efd9ch3x492edeh6pdwycvt7g030jfzhagg5ftr55";
        assert!(validate_address(flipped).is_err());
    }

    #[test]
    fn test_validate_address_rejects_stake_and_garbage() {
        let stake = "stake1uyehkck0lajq8gr28t9uxnuvgcqrc6070x3k9r8048z8y5gh6ffgw";
        assert!(validate_address(stake).is_err());
        assert!(validate_address("not an address").is_err());
    }

    #[test]
    fn test_remove_trailing_slash() {
        assert_eq!(remove_trailing_slash("http://x/api/v0/"), "http://x/api/v0");
        assert_eq!(remove_trailing_slash("http://x/api/v0"), "http://x/api/v0");
    }
}
