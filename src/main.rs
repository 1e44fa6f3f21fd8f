fn main() {
    #[cfg(feature = "csr")]
    rag_assistant::start();
}
