use stablehash_canonical::{canonical_bytes, Record, Value};
use stablehash_digest::{digest_hex, DigestAlgorithm};

fn main() {
    let value: Value = Record::new("Example")
        .field("Name", "a")
        .field("Tags", vec!["x", "y"])
        .field("Meta", Value::map([(2u64, "b"), (1u64, "a")]))
        .into();

    match canonical_bytes(&value) {
        Ok(bytes) => {
            println!("{}", String::from_utf8_lossy(&bytes));
        }
        Err(err) => {
            eprintln!("encoding failed: {}", err);
            std::process::exit(1);
        }
    }

    for alg in [
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Md5,
    ] {
        match digest_hex(&value, alg) {
            Ok(hex) => println!("{alg}: {hex}"),
            Err(err) => {
                eprintln!("digest failed: {}", err);
                std::process::exit(1);
            }
        }
    }
}
