//! In-memory product catalog.
//!
//! The catalog is a fixed set of products built at startup. There is no
//! database behind it; products change rarely enough that a code change
//! and redeploy is the update path.

use ozlasteksan_core::{Product, ProductId};

/// The product catalog.
///
/// Holds every product in display order. Lookups by id scan the list,
/// which is fine at this size.
pub struct Catalog {
    products: Vec<Product>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Build the catalog with the full product set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: seed_products(),
        }
    }

    /// All products in display order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a single product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products belonging to the given category.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Distinct category names in first-appearance order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(product.category.as_str());
            }
        }
        seen
    }
}

fn product(id: i32, name: &str, category: &str, description: &str, icon: &str) -> Product {
    Product {
        id: ProductId::from(id),
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        images: Vec::new(),
    }
}

fn seed_products() -> Vec<Product> {
    vec![
        product(
            1,
            "O-ring Conta",
            "Conta",
            "Endüstriyel sızdırmazlık uygulamaları için yüksek dayanımlı O-ring contalar. \
             Farklı ölçü ve elastomer seçenekleri mevcuttur.",
            "fa-circle",
        ),
        product(
            2,
            "Kauçuk Levhalar",
            "Levha",
            "SBR, NBR, EPDM, neopren ve silikon levhalar. 1 mm - 50 mm kalınlık aralığında \
             plaka kesim desteği.",
            "fa-layer-group",
        ),
        product(
            3,
            "Kaplin Lastikleri",
            "Kaplin",
            "Yıldız, fışkı ve papatya tip kaplin lastikleri. Titreşim sönümleme ve yüksek \
             tork aktarımı sağlar.",
            "fa-cog",
        ),
        product(
            4,
            "Kauçuk Takozlar",
            "Takoz",
            "Silindir, konik ve özel formda takozlar. Makine ve teçhizat montajlarında \
             vibrasyon kontrolü sunar.",
            "fa-cube",
        ),
        product(
            5,
            "Kauçuk Körükler",
            "Körük",
            "Özel ölçülerde esnek körük sistemleri. Hareket ve genleşme kompanzasyonu için \
             üretilir.",
            "fa-expand-arrows-alt",
        ),
        product(
            6,
            "Diyafram Lastikleri",
            "Diyafram",
            "Pompa ve vana sistemleri için uzun ömürlü diyafram lastikleri. Kimyasal \
             dayanımı yüksek seçenekler.",
            "fa-record-vinyl",
        ),
        product(
            7,
            "Kablo Geçit Lastikleri",
            "Geçit",
            "Kablo ve boru geçişlerinde tam sızdırmazlık sağlayan contalar. Elektromekanik \
             sistemlerle uyumlu.",
            "fa-plug",
        ),
        product(
            8,
            "Kauçuk Profil Boru",
            "Profil",
            "Özel kesit profilli kauçuk hortum ve borular. Tasarımınıza uygun ölçülerde \
             üretim yapılır.",
            "fa-shapes",
        ),
        product(
            9,
            "Silikon Levhalar",
            "Levha",
            "Gıda onaylı silikon levhalar. 60-80 Shore A sertlik seçenekleri ve yüksek ısı \
             dayanımı sunar.",
            "fa-layer-group",
        ),
        product(
            10,
            "Poliüretan Levhalar",
            "Levha",
            "Yüksek aşınma direncine sahip poliüretan levhalar. Darbe ve kesilme direncine \
             ihtiyaç duyulan uygulamalar için.",
            "fa-layer-group",
        ),
        product(
            11,
            "Sünger Levhalar",
            "Levha",
            "Açık ve kapalı gözenekli sünger levhalar. Yalıtım, dolgu ve amortisör amaçlı \
             kullanıma uygundur.",
            "fa-layer-group",
        ),
        product(
            12,
            "Yıldız Kaplin Lastikleri",
            "Kaplin",
            "Esnek yıldız kaplin elastomerleri. Çeşitli boyut ve shore sertliklerinde \
             stoktan temin edilir.",
            "fa-star",
        ),
        product(
            13,
            "Fışkı Kaplin Lastikleri",
            "Kaplin",
            "Silindirik fışkı kaplin lastikleri. Yüksek moment aktarımı ve titreşim \
             sönümleme sağlar.",
            "fa-cog",
        ),
        product(
            14,
            "Titreşim Kesen Lastikler",
            "Takoz",
            "Anti-vibrasyon lastik takozlar. Motor, kompresör ve makine montajları için \
             geliştirilmiştir.",
            "fa-compress-arrows-alt",
        ),
        product(
            15,
            "U Tipi Lastikler",
            "Conta",
            "U profil kauçuk contalar. Şaft ve piston sızdırmazlığı için farklı malzeme \
             seçenekleri.",
            "fa-square",
        ),
        product(
            16,
            "Vana Lastikleri",
            "Diyafram",
            "Kelebek vana ve endüstriyel vana lastikleri. Kimyasal dayanımı yüksek \
             karışımlar ile üretilir.",
            "fa-circle-notch",
        ),
        product(
            17,
            "Vantuz Lastikleri",
            "Özel",
            "Endüstriyel vantuz sistemleri için elastomer parçalar. Vakum performansı \
             yüksek çözümler.",
            "fa-dot-circle",
        ),
        product(
            18,
            "Özel Üretim Kauçuk",
            "Özel",
            "Projelerinize özel tasarım ve üretim kauçuk parçalar. CAD desteği ve numune \
             üretimi dahildir.",
            "fa-tools",
        ),
    ]
}
