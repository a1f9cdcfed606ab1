pub(crate) mod toys;
