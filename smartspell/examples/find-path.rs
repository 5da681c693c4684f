use smartspell::paths;

fn main() {
    let tag_arg = match std::env::args().nth(1) {
        Some(v) => v,
        None => {
            eprintln!("No tag passed.");
            return;
        }
    };

    let tag = match tag_arg.parse() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid tag: {:?}", e);
            return;
        }
    };

    match paths::find_dictionary_path(&tag) {
        Some(v) => println!("Dictionary: {}", v.display()),
        None => println!("Dictionary not found!"),
    }

    match paths::find_model_path(None) {
        Some(v) => println!("Model: {}", v.display()),
        None => {
            println!("Model not found, searched:");
            for path in paths::model_search_paths(None) {
                println!("  {}", path.display());
            }
        }
    }
}
