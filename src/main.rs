fn main() {
    bangla_normalizer_lib::run()
}
