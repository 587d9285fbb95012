/*!
# Concierge DevKit - Stubs et Utilitaires pour Développement

Bibliothèque facilitant le développement des connecteurs PMS avec:
- Fixtures de payloads vendeurs (Mews, Opera, génériques)
- Stub PMS HTTP pour tester les syncs sans vrai vendeur
- Payloads dégénérés pour vérifier la tolérance des normalisations
*/

pub mod fixtures;
pub mod pms_stub;

pub use pms_stub::StubPms;
