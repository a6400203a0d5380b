fn main() {
    boothost::build!("boothost.toml");
}
